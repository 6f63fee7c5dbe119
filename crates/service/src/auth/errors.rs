use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists")]
    Conflict,
    #[error("Invalid username or password")]
    Unauthorized,
    #[error("Access denied. No token provided.")]
    MissingToken,
    #[error("Invalid token.")]
    InvalidToken,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Conflict => 1002,
            AuthError::Unauthorized => 1004,
            AuthError::MissingToken => 1005,
            AuthError::InvalidToken => 1006,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        AuthError::Repository(e.to_string())
    }
}
