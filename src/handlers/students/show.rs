// handlers/students/show.rs - GET /students/:id handler

use axum::extract::{Path, State};

use super::require_id;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Student;

pub async fn student_show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Student> {
    let id = require_id(&id)?;
    let student = state.students.get(id).await?;
    Ok(ApiResponse::success(student))
}
