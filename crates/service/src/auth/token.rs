//! Signed, time-limited bearer tokens (HS256 JWT).
//!
//! Verification is a pure function of the token, the clock and the secret;
//! there is no revocation list.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Identity carried by a token; attached to protected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub iat: u64,
    pub exp: u64,
}

/// Process-wide signing material, built once at startup.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    /// Issue a token valid for the configured lifetime starting now.
    pub fn issue(&self, user_id: &str, username: &str) -> Result<String, AuthError> {
        self.issue_at(user_id, username, now_secs())
    }

    /// Issue a token as if it were `issued_at` (unix seconds).
    pub fn issue_at(&self, user_id: &str, username: &str, issued_at: u64) -> Result<String, AuthError> {
        let claims = Claims {
            id: user_id.to_string(),
            username: username.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(err = %e, "token rejected");
                AuthError::InvalidToken
            })
    }
}

/// Strip an optional `Bearer ` prefix from an `Authorization` header value.
pub fn strip_bearer(header: &str) -> &str {
    header.strip_prefix("Bearer ").unwrap_or(header)
}

fn now_secs() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips_identity() -> Result<(), AuthError> {
        let keys = TokenKeys::new("secret", 3600);
        let token = keys.issue("u1", "alice")?;
        let claims = keys.verify(&token)?;
        assert_eq!(claims.id, "u1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
        Ok(())
    }

    #[test]
    fn expired_token_is_rejected_even_with_valid_signature() -> Result<(), AuthError> {
        let keys = TokenKeys::new("secret", 3600);
        let token = keys.issue_at("u1", "alice", now_secs() - 3601 - 5)?;
        assert!(matches!(keys.verify(&token), Err(AuthError::InvalidToken)));
        Ok(())
    }

    #[test]
    fn foreign_signature_is_rejected() -> Result<(), AuthError> {
        let ours = TokenKeys::new("secret", 3600);
        let theirs = TokenKeys::new("other", 3600);
        let token = theirs.issue("u1", "mallory")?;
        assert!(matches!(ours.verify(&token), Err(AuthError::InvalidToken)));
        assert!(matches!(ours.verify("not.a.jwt"), Err(AuthError::InvalidToken)));
        Ok(())
    }

    #[test]
    fn bearer_prefix_is_optional() {
        assert_eq!(strip_bearer("Bearer abc"), "abc");
        assert_eq!(strip_bearer("abc"), "abc");
        assert_eq!(strip_bearer("bearer abc"), "bearer abc");
    }
}
