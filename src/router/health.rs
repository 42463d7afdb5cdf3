//! Liveness and readiness probes
//!
//! Fixed literal bodies, entirely outside the MCP dispatch path.

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::store::state::SharedState;

/// Creates the health probe routes
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/health", get(handle_health))
        .route("/health/ready", get(handle_ready))
}

/// Endpoint: GET /health
async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "document-store-rust"}))
}

/// Endpoint: GET /health/ready
async fn handle_ready() -> impl IntoResponse {
    Json(json!({"status": "ready", "service": "document-store-rust"}))
}
