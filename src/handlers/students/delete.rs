// handlers/students/delete.rs - DELETE /students/:id handler

use axum::extract::{Path, State};
use serde::Serialize;

use super::require_id;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    /// False when nothing matched the id
    pub existed: bool,
}

/// DELETE /students/:id - Succeeds whether or not the student existed
pub async fn student_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<DeleteResponse> {
    let id = require_id(&id)?;
    let existed = state.students.delete(id).await?;
    Ok(ApiResponse::success(DeleteResponse {
        message: "Successfully Deleted",
        existed,
    }))
}
