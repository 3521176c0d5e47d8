//! Cloudinary image upload provider.
//!
//! Uploads are signed: the parameters that are sent (except `file`,
//! `api_key` and `signature_algorithm`) are sorted by name, joined as
//! `k=v&k=v`, suffixed with the API secret and hashed with SHA-256.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use chatline_core::config::{CloudinaryConfig, MediaConfig};
use chatline_core::error::{AppError, ErrorKind};
use chatline_core::result::AppResult;
use chatline_core::traits::media::{MediaHost, UploadedMedia};

use crate::payload;

/// Successful upload response. Only the fields we persist are read.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    #[serde(default)]
    public_id: Option<String>,
}

/// Error body returned by the upload API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Media host backed by the Cloudinary upload API.
#[derive(Debug, Clone)]
pub struct CloudinaryMediaHost {
    client: Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
    folder: Option<String>,
}

impl CloudinaryMediaHost {
    /// Create a provider from configuration.
    pub fn new(config: &MediaConfig) -> AppResult<Self> {
        let CloudinaryConfig {
            cloud_name,
            api_key,
            api_secret,
            folder,
            api_base_url,
        } = &config.cloudinary;

        if cloud_name.is_empty() || api_key.is_empty() || api_secret.is_empty() {
            return Err(AppError::configuration(
                "media.cloudinary requires cloud_name, api_key and api_secret",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            upload_url: format!(
                "{}/{}/image/upload",
                api_base_url.trim_end_matches('/'),
                cloud_name
            ),
            api_key: api_key.clone(),
            api_secret: api_secret.clone(),
            folder: folder.clone().filter(|f| !f.is_empty()),
        })
    }

    /// Parameters covered by the signature.
    fn signed_params(&self, timestamp: i64) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        params.insert("timestamp", timestamp.to_string());
        if let Some(folder) = &self.folder {
            params.insert("folder", folder.clone());
        }
        params
    }

    /// Hex SHA-256 of the canonical parameter string plus the API secret.
    fn sign(&self, params: &BTreeMap<&'static str, String>) -> String {
        let canonical = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl MediaHost for CloudinaryMediaHost {
    fn provider_type(&self) -> &str {
        "cloudinary"
    }

    async fn upload_image(&self, payload: &str) -> AppResult<UploadedMedia> {
        let kind = payload::classify(payload)?;

        let params = self.signed_params(Utc::now().timestamp());
        let signature = self.sign(&params);

        let mut body = serde_json::Map::new();
        for (k, v) in &params {
            body.insert((*k).to_string(), v.clone().into());
        }
        body.insert("file".to_string(), payload.trim().into());
        body.insert("api_key".to_string(), self.api_key.clone().into());
        body.insert("signature".to_string(), signature.into());
        body.insert("signature_algorithm".to_string(), "sha256".into());

        debug!(url = %self.upload_url, ?kind, "Uploading image");

        let response = self
            .client
            .post(&self.upload_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Service, "Image upload failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.to_string());
            warn!(%status, %detail, "Media host rejected upload");
            return Err(AppError::service(format!("Image upload rejected: {detail}")));
        }

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::Service, "Malformed media host response", e)
        })?;

        debug!(public_id = ?uploaded.public_id, "Image stored on media host");
        Ok(UploadedMedia {
            secure_url: uploaded.secure_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use chatline_core::error::ErrorKind;

    use super::*;

    fn config() -> MediaConfig {
        MediaConfig {
            provider: "cloudinary".to_string(),
            timeout_seconds: 5,
            cloudinary: CloudinaryConfig {
                cloud_name: "demo".to_string(),
                api_key: "1234".to_string(),
                api_secret: "abcd".to_string(),
                folder: None,
                api_base_url: "https://api.cloudinary.com/v1_1/".to_string(),
            },
        }
    }

    #[test]
    fn test_upload_url() {
        let host = CloudinaryMediaHost::new(&config()).unwrap();
        assert_eq!(
            host.upload_url,
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn test_missing_credentials_is_configuration_error() {
        let mut cfg = config();
        cfg.cloudinary.api_secret.clear();
        let err = CloudinaryMediaHost::new(&cfg).unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_signature_covers_sorted_params_and_secret() {
        let mut cfg = config();
        cfg.cloudinary.folder = Some("avatars".to_string());
        let host = CloudinaryMediaHost::new(&cfg).unwrap();

        let params = host.signed_params(1_700_000_000);
        let expected = {
            let mut hasher = Sha256::new();
            hasher.update(b"folder=avatars&timestamp=1700000000abcd");
            format!("{:x}", hasher.finalize())
        };
        assert_eq!(host.sign(&params), expected);
        assert_eq!(host.sign(&params).len(), 64);
    }

    #[test]
    fn test_signature_changes_with_timestamp() {
        let host = CloudinaryMediaHost::new(&config()).unwrap();
        assert_ne!(
            host.sign(&host.signed_params(1)),
            host.sign(&host.signed_params(2))
        );
    }

    #[tokio::test]
    async fn test_invalid_payload_rejected_before_network() {
        let host = CloudinaryMediaHost::new(&config()).unwrap();
        let err = host.upload_image("plainly not an image").await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}
