//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod media;
pub mod realtime;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::media::{CloudinaryConfig, MediaConfig};
pub use self::realtime::RealtimeConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// User datastore settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token signing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Profile picture host settings.
    #[serde(default)]
    pub media: MediaConfig,
    /// Realtime websocket settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// and environment variables prefixed with `CHATLINE__`
    /// (e.g. `CHATLINE__AUTH__JWT_SECRET`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CHATLINE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_every_section() {
        let config: AppConfig = serde_json::from_str("{}").expect("empty config should parse");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.body_limit_bytes, 4 * 1024 * 1024);
        assert_eq!(config.database.provider, "postgres");
        assert_eq!(config.media.provider, "disabled");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server": {"port": 8081}, "auth": {"jwt_secret": "s3cret"}}"#)
                .expect("partial config should parse");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.auth.token_ttl_hours, 168);
    }
}
