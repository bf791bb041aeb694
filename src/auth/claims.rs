use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Verified payload of a bearer token.
///
/// Only produced by [`TokenValidator`](super::TokenValidator) and lives for
/// the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Wire shape of the token payload. `user_id` wins over the standard `sub`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenClaims {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
}

impl TokenClaims {
    /// Returns `None` when the token carries no usable subject
    pub(crate) fn into_claim_set(self) -> Option<ClaimSet> {
        let user_id = self
            .user_id
            .filter(|id| !id.trim().is_empty())
            .or_else(|| self.sub.filter(|id| !id.trim().is_empty()))?;
        let expires_at = Utc.timestamp_opt(self.exp, 0).single()?;

        Some(ClaimSet { user_id, expires_at })
    }
}
