//! Unified application error types for Chatline.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The kinds mirror what a caller of the
//! public operations can observe; anything unexpected downstream is a
//! [`ErrorKind::Service`] error.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Required input was missing or malformed.
    Validation,
    /// A user with the same email is already registered.
    DuplicateUser,
    /// Login failed. Deliberately does not say whether the email exists.
    InvalidCredentials,
    /// The session token was missing, invalid, expired, or its user is gone.
    Unauthenticated,
    /// The referenced entity no longer exists.
    NotFound,
    /// An unexpected downstream fault (datastore, media host, hashing).
    Service,
    /// The process configuration could not be loaded.
    Configuration,
}

impl ErrorKind {
    /// Machine-readable code used in API responses.
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::DuplicateUser => "DUPLICATE_USER",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::NotFound => "NOT_FOUND",
            Self::Service => "SERVICE_ERROR",
            Self::Configuration => "CONFIGURATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// The unified application error used throughout Chatline.
///
/// Adapters map their library errors into `AppError` with explicit
/// `.map_err()` calls so the kind is always chosen at the boundary that
/// understands the failure.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a duplicate-user error.
    pub fn duplicate_user(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateUser, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a service error.
    pub fn service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Service, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Returns `true` if this error has the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Service,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_message() {
        let err = AppError::duplicate_user("User already exists");
        assert_eq!(err.to_string(), "DUPLICATE_USER: User already exists");
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("disk on fire");
        let err = AppError::with_source(ErrorKind::Service, "write failed", io);
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert!(cloned.is(ErrorKind::Service));
        assert_eq!(cloned.message, "write failed");
    }
}
