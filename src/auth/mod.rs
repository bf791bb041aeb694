pub mod claims;
pub mod validator;

pub use claims::ClaimSet;
pub use validator::{AuthError, TokenValidator};
