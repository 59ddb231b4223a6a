//! Health check endpoint.

use axum::Json;

/// GET /health - Basic liveness probe.
///
/// Returns 200 immediately. No store or cache checks; the process being
/// able to answer is the signal.
#[axum::debug_handler]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
