//! Media host used when no provider is configured.

use async_trait::async_trait;

use chatline_core::error::AppError;
use chatline_core::result::AppResult;
use chatline_core::traits::media::{MediaHost, UploadedMedia};

use crate::payload;

/// Rejects every upload. Profiles without pictures still work.
#[derive(Debug, Clone, Default)]
pub struct DisabledMediaHost;

#[async_trait]
impl MediaHost for DisabledMediaHost {
    fn provider_type(&self) -> &str {
        "disabled"
    }

    async fn upload_image(&self, payload: &str) -> AppResult<UploadedMedia> {
        payload::classify(payload)?;
        Err(AppError::service("No media host is configured"))
    }
}

#[cfg(test)]
mod tests {
    use chatline_core::error::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn test_upload_fails_with_service_error() {
        let err = DisabledMediaHost
            .upload_image("data:image/png;base64,AAAA")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Service));
    }

    #[tokio::test]
    async fn test_bad_payload_is_still_a_validation_error() {
        let err = DisabledMediaHost.upload_image("nope").await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}
