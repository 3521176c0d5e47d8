//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use chatline_core::error::{AppError, ErrorKind};
use chatline_core::result::AppResult;

/// Hashes and verifies passwords with Argon2id.
///
/// Hashes embed their own salt and parameters (PHC string format), so a
/// stored hash is verifiable without any other state.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::service(format!("Password hashing failed: {e}")))
    }

    /// Checks a plaintext password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; only a corrupt hash or an internal
    /// failure is an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            AppError::new(ErrorKind::Service, format!("Stored password hash is corrupt: {e}"))
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::service(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("hunter2").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("hunter2", &hash).unwrap());
        assert!(!hasher.verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("secret").unwrap();
        let b = hasher.hash_password("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_corrupt_hash_is_service_error() {
        let err = PasswordHasher::new()
            .verify_password("secret", "not-a-phc-string")
            .unwrap_err();
        assert!(err.is(ErrorKind::Service));
    }
}
