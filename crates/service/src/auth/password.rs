//! Salted one-way password digests (argon2, default parameters).

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Hash with a fresh random salt; the PHC string embeds salt and parameters.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// Check `plaintext` against a stored PHC string. A malformed digest is an error,
/// a wrong password is `Ok(false)`.
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(digest).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(plaintext.as_bytes(), &parsed).is_ok())
}
