//! API request handlers

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::api::types::AnswerResponse;
use crate::api::types::ApiError;
use crate::api::types::HealthResponse;
use crate::api::types::QuestionRequest;
use crate::api::types::StatusResponse;
use crate::rag::AnswerService;
use crate::registry::SemanticIndex;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<AnswerService>,
    pub registry: Arc<dyn SemanticIndex>,
    pub service_name: String,
    pub course_collection: String,
    pub forum_collection: String,
    /// Set once corpus indexing has completed
    pub ready: Arc<AtomicBool>,
}

/// Answer a question (POST /api)
pub async fn answer(
    State(state): State<AppState>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    if !state.ready.load(Ordering::Acquire) {
        return Err(ApiError::not_ready());
    }

    // Reject blank questions before any retrieval work begins.
    let question = req.question.trim();
    if question.is_empty() {
        return Err(ApiError::empty_question());
    }

    let preview: String = question.chars().take(50).collect();
    info!("POST /api: {}... (image: {})", preview, req.image.is_some());

    match state
        .answer_service
        .answer(question, req.image.as_deref())
        .await
    {
        Ok(result) => Ok(Json(AnswerResponse::from(result))),
        Err(e) => {
            error!("Error processing question: {}", e);
            Err(ApiError::internal())
        }
    }
}

/// Liveness probe (GET /)
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "active".to_string(),
        service: state.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Status probe with per-collection document counts (GET /status)
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let course_documents = count_or_zero(state.registry.as_ref(), &state.course_collection).await;
    let forum_posts = count_or_zero(state.registry.as_ref(), &state.forum_collection).await;

    Json(StatusResponse {
        status: "operational".to_string(),
        course_documents,
        forum_posts,
    })
}

/// Count a collection, reporting zero on failure rather than an error
async fn count_or_zero(registry: &dyn SemanticIndex, collection: &str) -> u64 {
    match registry.count(collection).await {
        Ok(count) => count,
        Err(e) => {
            warn!("Failed to count collection '{}': {}", collection, e);
            0
        }
    }
}
