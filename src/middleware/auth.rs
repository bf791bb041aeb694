use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::auth::{AuthError, ClaimSet, TokenValidator};
use crate::error::ApiError;

/// Why the gate turned a request away. Only logged; every variant produces
/// the same 401 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unauthorized {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("Authorization header is not 'Bearer <token>'")]
    MalformedScheme,
    #[error("bearer token rejected: {0}")]
    TokenRejected(AuthError),
}

/// Authenticated caller, available to handlers behind [`require_auth`]
#[derive(Debug, Clone)]
pub struct AuthUser(pub ClaimSet);

impl AuthUser {
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }
}

/// JWT authentication middleware.
///
/// Rejected requests get a 401 and never reach the inner handler. Accepted
/// requests carry exactly one [`ClaimSet`] in their extensions.
pub async fn require_auth(
    State(validator): State<Arc<TokenValidator>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = match authenticate(&validator, request.headers().get(AUTHORIZATION)) {
        Ok(claims) => claims,
        Err(reason) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                reason = %reason,
                "Rejected unauthenticated request"
            );
            return Err(reason.into());
        }
    };

    tracing::debug!(user_id = %claims.user_id, "Authenticated request");
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Resolve an `Authorization` header value into verified claims
pub fn authenticate(
    validator: &TokenValidator,
    header: Option<&HeaderValue>,
) -> Result<ClaimSet, Unauthorized> {
    let token = bearer_token(header)?;
    validator.validate(token).map_err(Unauthorized::TokenRejected)
}

/// Extract the credential from `Bearer <token>`. The scheme is matched
/// case-insensitively and the value must split into exactly two parts.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, Unauthorized> {
    let value = header.ok_or(Unauthorized::MissingHeader)?;
    let value = value.to_str().map_err(|_| Unauthorized::MalformedScheme)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(Unauthorized::MalformedScheme),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ClaimSet>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::error!("AuthUser requested on a route without require_auth");
                ApiError::unauthorized("Unauthorized")
            })
    }
}
