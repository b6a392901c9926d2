//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create the service router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Question answering
        .route("/api", post(handlers::answer))
        // Liveness probe
        .route("/", get(handlers::health))
        // Collection counts
        .route("/status", get(handlers::status))
        .with_state(state)
}
