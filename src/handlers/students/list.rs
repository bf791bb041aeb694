// handlers/students/list.rs - GET /students handler

use axum::extract::State;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Student;

/// GET /students - First page of students, sized by `API_LIST_PAGE_SIZE`
pub async fn student_list(State(state): State<AppState>) -> ApiResult<Vec<Student>> {
    let students = state.students.list(state.config.api.list_page_size).await?;
    Ok(ApiResponse::success(students))
}
