//! HTTP server implementation

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::corpus;
use crate::llm::LlmClient;
use crate::rag::AnswerService;
use crate::registry::RegistryClient;
use crate::registry::SemanticIndex;
use crate::Result;

/// Outer request deadline covering the image, retrieval, and model calls,
/// each of which carries its own client timeout
const REQUEST_TIMEOUT_SECS: u64 = 180;

/// Start the API server
///
/// Indexes both corpora before accepting traffic; an unreachable registry or
/// a missing corpus file aborts startup instead of serving from empty
/// collections.
pub async fn serve_api(
    config: &AppConfig,
    host: String,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    info!("Starting Virtual TA API server...");

    config.validate()?;

    // Initialize services
    let registry: Arc<dyn SemanticIndex> = Arc::new(RegistryClient::new(&config.registry)?);
    let llm_client = Arc::new(LlmClient::new(config)?);
    let answer_service = Arc::new(AnswerService::from_services(
        registry.clone(),
        llm_client.clone(),
        llm_client,
        config,
    ));

    let ready = Arc::new(AtomicBool::new(false));

    let state = AppState {
        answer_service,
        registry: registry.clone(),
        service_name: config.service_name().to_string(),
        course_collection: config.course_collection().to_string(),
        forum_collection: config.forum_collection().to_string(),
        ready: ready.clone(),
    };

    // One-time corpus indexing; requests observe "not ready" until it is done.
    let (course_count, forum_count) = corpus::index_corpora(registry.as_ref(), config).await?;
    ready.store(true, Ordering::Release);
    info!(
        "Collections ready: {} course documents, {} forum posts",
        course_count, forum_count
    );

    // Build routes and middleware layers
    let mut app = routes::api_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)));

    // Add CORS if enabled
    if enable_cors {
        info!("CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("");
    info!("Available endpoints:");
    info!("  POST /api     - Answer a question");
    info!("  GET  /        - Liveness probe");
    info!("  GET  /status  - Collection document counts");

    axum::serve(listener, app).await?;

    Ok(())
}
