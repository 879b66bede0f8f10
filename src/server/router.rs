use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{health, query, reports};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// - liveness and status endpoints
/// - query endpoint (question + optional history and report scope)
/// - report upload endpoint (multipart PDF)
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/status", get(health::get_status))
        .route("/api/query", post(query::submit_query))
        .route("/api/reports", post(reports::upload_report))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .with_state(state)
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
