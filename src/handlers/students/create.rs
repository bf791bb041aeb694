// handlers/students/create.rs - POST /students handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;

use super::StudentRequest;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::types::Student;

/// POST /students - Create a student owned by the authenticated caller
///
/// Expected Input:
/// ```json
/// {
///   "fname": "Ada",              // Required
///   "lname": "Lovelace",         // Required
///   "email": "ada@x.io",         // Required
///   "gender": "F",               // Optional: M, F, O
///   "dateofbirth": "1815-12-10", // Optional
///   "address": "string"          // Optional
/// }
/// ```
///
/// Responds 201 with the stored student, including its generated `id` and
/// `createdon`. `createdby` is the token's user id.
pub async fn student_create(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> ApiResult<Student> {
    let Json(request) = payload?;
    request.validate(Utc::now().date_naive())?;

    let student = Student {
        created_by: user.user_id().to_string(),
        updated_by: String::new(),
        ..request.into_student()
    };

    let created = state.students.create(student).await?;
    Ok(ApiResponse::created(created))
}
