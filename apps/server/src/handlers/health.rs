use axum::response::IntoResponse;
use axum::Json;

/// GET /health/live — returns 200 unconditionally.
/// Used by load balancers to check if the process is alive.
pub async fn liveness() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
