use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let provider_reachable = state.engine.provider_reachable().await;
    Json(json!({
        "base_documents": state.engine.base_len(),
        "report_chunks": state.engine.report_len(),
        "embedding_model": state.settings.embedding_model,
        "chat_model": state.settings.chat_model,
        "provider_reachable": provider_reachable,
    }))
}
