// handlers/students/update.rs - PUT /students/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;

use super::{require_id, StudentRequest};
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Student;

/// PUT /students/:id - Replace every editable field of a student
///
/// Takes the same body as creation plus an optional `updatedby`. Fields left
/// out are cleared. `createdby` and `createdon` are never touched.
pub async fn student_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> ApiResult<Student> {
    let id = require_id(&id)?;
    let Json(request) = payload?;
    request.validate(Utc::now().date_naive())?;

    let updated = state.students.update(id, request.into_student()).await?;
    Ok(ApiResponse::success(updated))
}
