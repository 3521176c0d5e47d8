//! Session token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use chatline_core::config::AuthConfig;
use chatline_core::error::AppError;
use chatline_core::result::AppResult;

use super::claims::Claims;

/// Verifies session tokens issued by [`super::JwtEncoder`].
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes a token, checking its signature and expiry.
    ///
    /// Every failure is `Unauthenticated`; the reason is only logged.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token.trim(), &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token has expired",
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => "Invalid token signature",
                    _ => "Invalid token",
                };
                debug!(error = %e, "Token rejected");
                AppError::unauthenticated(reason)
            })
    }
}
