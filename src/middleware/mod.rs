pub mod auth;
pub mod response;

pub use auth::{require_auth, AuthUser, Unauthorized};
pub use response::{ApiResponse, ApiResult};
