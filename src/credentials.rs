//! Faculty credential hashing
//!
//! Secrets are stored as Argon2id PHC strings, never in plain text.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{BillingError, BillingResult};

/// Minimum accepted secret length
pub const MIN_SECRET_LEN: usize = 6;

/// Hash a secret with a fresh random salt
pub fn hash_secret(secret: &str) -> BillingResult<String> {
    if secret.chars().count() < MIN_SECRET_LEN {
        return Err(BillingError::Validation(format!(
            "Password must be at least {} characters",
            MIN_SECRET_LEN
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| BillingError::Credential(format!("Hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a secret against a stored PHC string
pub fn verify_secret(secret: &str, stored: &str) -> BillingResult<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| BillingError::Credential(format!("Stored hash is malformed: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_secret("lecture42").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_secret("lecture42", &hash).unwrap());
        assert!(!verify_secret("lecture43", &hash).unwrap());
    }

    #[test]
    fn test_short_secret_rejected() {
        let err = hash_secret("abc").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_malformed_hash() {
        assert!(verify_secret("whatever", "not-a-hash").is_err());
    }
}
