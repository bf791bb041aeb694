// handlers/health.rs - Liveness and readiness probes

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET /health - Process is up; never touches storage
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}

/// GET /ready - Storage answers a ping within the request deadline
pub async fn ready(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.students.ready_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Readiness check failed");
        ApiError::service_unavailable("Storage is unavailable")
    })?;

    Ok(Json(json!({ "status": "ready" })))
}
