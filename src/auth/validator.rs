use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::fmt;

use super::claims::{ClaimSet, TokenClaims};
use crate::config::SecurityConfig;

/// Why a bearer token was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token is outside its validity window")]
    Expired,
    #[error("token validation is not configured")]
    MissingSecret,
}

/// Verifies HS256 bearer tokens against the configured shared secret.
///
/// Holds only read-only key material, so one instance is shared by every
/// request.
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

impl TokenValidator {
    pub fn new(security: &SecurityConfig) -> Result<Self, AuthError> {
        Self::from_secret(security.jwt_secret.as_bytes(), security.jwt_leeway_secs)
    }

    pub fn from_secret(secret: &[u8], leeway_secs: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Validate a raw token (no `Bearer ` prefix) and return its claims
    pub fn validate(&self, token: &str) -> Result<ClaimSet, AuthError> {
        let data = decode::<TokenClaims>(token, &self.key, &self.validation)
            .map_err(|e| classify(e.kind()))?;

        data.claims.into_claim_set().ok_or(AuthError::Malformed)
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => AuthError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidKeyFormat => {
            AuthError::InvalidSignature
        }
        _ => AuthError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};

    const SECRET: &[u8] = b"unit-test-secret";

    fn mint(claims: Value, secret: &[u8]) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn validator() -> TokenValidator {
        TokenValidator::from_secret(SECRET, 0).unwrap()
    }

    #[test]
    fn accepts_valid_token() {
        let exp = Utc::now().timestamp() + 3600;
        let token = mint(json!({ "user_id": "user-42", "exp": exp }), SECRET);

        let claims = validator().validate(&token).unwrap();
        assert_eq!(claims.user_id, "user-42");
        assert_eq!(claims.expires_at.timestamp(), exp);
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(validator().validate("not-a-jwt").unwrap_err(), AuthError::Malformed);
        assert_eq!(validator().validate("").unwrap_err(), AuthError::Malformed);
        assert_eq!(validator().validate("a.b.c").unwrap_err(), AuthError::Malformed);
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let token = mint(json!({ "user_id": "u", "exp": Utc::now().timestamp() + 60 }), b"other-secret");
        assert_eq!(validator().validate(&token).unwrap_err(), AuthError::InvalidSignature);
    }

    #[test]
    fn wrong_algorithm_is_invalid_signature() {
        let claims = json!({ "user_id": "u", "exp": Utc::now().timestamp() + 60 });
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert_eq!(validator().validate(&token).unwrap_err(), AuthError::InvalidSignature);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = mint(json!({ "user_id": "u", "exp": Utc::now().timestamp() - 3600 }), SECRET);
        assert_eq!(validator().validate(&token).unwrap_err(), AuthError::Expired);
    }

    #[test]
    fn not_yet_valid_token_is_rejected() {
        let now = Utc::now().timestamp();
        let token = mint(json!({ "user_id": "u", "exp": now + 7200, "nbf": now + 3600 }), SECRET);
        assert_eq!(validator().validate(&token).unwrap_err(), AuthError::Expired);
    }

    #[test]
    fn token_without_exp_is_malformed() {
        let token = mint(json!({ "user_id": "u" }), SECRET);
        assert_eq!(validator().validate(&token).unwrap_err(), AuthError::Malformed);
    }

    #[test]
    fn token_without_subject_is_malformed() {
        let token = mint(json!({ "exp": Utc::now().timestamp() + 60 }), SECRET);
        assert_eq!(validator().validate(&token).unwrap_err(), AuthError::Malformed);
    }

    #[test]
    fn empty_secret_is_refused() {
        assert_eq!(TokenValidator::from_secret(b"", 0).unwrap_err(), AuthError::MissingSecret);
    }
}
