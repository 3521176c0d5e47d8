//! Session token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use chatline_core::config::AuthConfig;
use chatline_core::error::{AppError, ErrorKind};
use chatline_core::result::AppResult;
use chatline_core::types::UserId;

use super::claims::Claims;

/// Issues HS256-signed session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails with a `Configuration` error if `token_ttl_hours` is too large
    /// to express as an expiry timestamp.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let ttl = i64::try_from(config.token_ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.token_ttl_hours is out of range: {}",
                    config.token_ttl_hours
                ))
            })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl,
        })
    }

    /// Issues a token for `user_id` valid for the configured lifetime.
    pub fn issue(&self, user_id: UserId) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: now
                .checked_add_signed(self.ttl)
                .ok_or_else(|| AppError::service("Token expiry overflows"))?
                .timestamp(),
        };
        self.sign(&claims)
    }

    /// Signs arbitrary claims with this encoder's key.
    pub fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::with_source(ErrorKind::Service, "Failed to sign token", e))
    }
}
