use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Health check endpoint.
///
/// A fixed acknowledgment with no dependency on the AI provider being
/// reachable.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "quizcraft-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
