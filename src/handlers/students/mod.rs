// handlers/students/mod.rs - Student record handlers
//
// Only creation sits behind the bearer-token gate; the other routes are
// public. Validation and status mapping happen here, never in the service.

pub mod create;  // POST /students
pub mod list;    // GET /students
pub mod show;    // GET /students/:id
pub mod update;  // PUT /students/:id
pub mod delete;  // DELETE /students/:id
pub mod request;

pub use create::student_create;
pub use delete::student_delete;
pub use list::student_list;
pub use request::StudentRequest;
pub use show::student_show;
pub use update::student_update;

use crate::error::ApiError;

/// Path ids must contain something other than whitespace
pub(crate) fn require_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::bad_request("Student id is required"));
    }
    Ok(id)
}
