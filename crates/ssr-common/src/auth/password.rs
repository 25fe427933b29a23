//! Password hashing and verification
//!
//! Account passwords and the deletion confirmation password are both kept
//! as Argon2id hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use ssr_core::DomainError;

use crate::error::AppError;

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password)
    }

    /// Fails with `InvalidCredentials` when the password does not match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if verify_password(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Confirmation password administrators repeat before irreversible deletions
///
/// Only the hash is kept in memory after startup.
#[derive(Clone)]
pub struct ConfirmationSecret {
    hash: String,
}

impl ConfirmationSecret {
    pub fn new(plain: &str) -> Result<Self, AppError> {
        if plain.is_empty() {
            return Err(AppError::Config("confirmation password must not be empty".to_string()));
        }
        Ok(Self {
            hash: hash_password(plain)?,
        })
    }

    pub fn check(&self, candidate: &str) -> Result<(), AppError> {
        if verify_password(candidate, &self.hash)? {
            Ok(())
        } else {
            Err(DomainError::ConfirmationFailed.into())
        }
    }
}

impl std::fmt::Debug for ConfirmationSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ConfirmationSecret(<redacted>)")
    }
}
