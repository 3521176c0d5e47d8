//! Media host (profile picture upload) configuration.

use serde::{Deserialize, Serialize};

/// Media host selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Provider: `"cloudinary"` or `"disabled"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Upload request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Cloudinary credentials.
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            timeout_seconds: default_timeout(),
            cloudinary: CloudinaryConfig::default(),
        }
    }
}

/// Cloudinary account settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    /// Cloud name (the account segment of the upload URL).
    #[serde(default)]
    pub cloud_name: String,
    /// API key.
    #[serde(default)]
    pub api_key: String,
    /// API secret used to sign upload requests.
    #[serde(default)]
    pub api_secret: String,
    /// Optional folder the images are stored under.
    #[serde(default)]
    pub folder: Option<String>,
    /// Base URL of the upload API.
    #[serde(default = "default_api_base")]
    pub api_base_url: String,
}

fn default_provider() -> String {
    "disabled".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_api_base() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}
