//! Argon2 hashing for account passwords.
//!
//! The hash string embeds its own salt and parameters, so verification
//! needs nothing beyond the stored hash itself. Failures surface as
//! [`AppError`] like every other fallible path in the crate.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            AppError::InternalServerError(anyhow::anyhow!("Password hashing failed: {}", e))
        })?;
    Ok(hash.to_string())
}

/// Checks a login attempt against the stored hash. A wrong password is
/// an ordinary `false`; only a malformed stored hash or a backend
/// failure is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        AppError::InternalServerError(anyhow::anyhow!("Stored password hash is invalid: {}", e))
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::InternalServerError(anyhow::anyhow!(
            "Password verification failed: {}",
            e
        ))),
    }
}
