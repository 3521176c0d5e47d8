//! Media host selection.

use std::sync::Arc;

use tracing::info;

use chatline_core::config::MediaConfig;
use chatline_core::error::AppError;
use chatline_core::result::AppResult;
use chatline_core::traits::media::MediaHost;

use crate::providers::{CloudinaryMediaHost, DisabledMediaHost};

/// Build the media host selected by `media.provider`.
pub fn connect_media_host(config: &MediaConfig) -> AppResult<Arc<dyn MediaHost>> {
    let host: Arc<dyn MediaHost> = match config.provider.as_str() {
        "cloudinary" => Arc::new(CloudinaryMediaHost::new(config)?),
        "disabled" => Arc::new(DisabledMediaHost),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown media provider: '{other}'. Supported: cloudinary, disabled"
            )));
        }
    };

    info!(provider = host.provider_type(), "Media host initialized");
    Ok(host)
}

#[cfg(test)]
mod tests {
    use chatline_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_default_config_is_disabled() {
        let host = connect_media_host(&MediaConfig::default()).unwrap();
        assert_eq!(host.provider_type(), "disabled");
    }

    #[test]
    fn test_unknown_provider() {
        let cfg = MediaConfig {
            provider: "imgur".to_string(),
            ..Default::default()
        };
        let err = connect_media_host(&cfg).unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }
}
