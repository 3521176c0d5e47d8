//! Media host trait for the external profile picture service.

use async_trait::async_trait;

use crate::result::AppResult;

/// A picture successfully stored by the media host.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UploadedMedia {
    /// Canonical HTTPS URL of the stored image. This is what gets persisted.
    pub secure_url: String,
}

/// Trait for image hosting backends.
///
/// The trait is defined here in `chatline-core` and implemented in
/// `chatline-storage`. Implementations perform one upload attempt and never
/// retry; any transport or provider failure is a `Service` error.
#[async_trait]
pub trait MediaHost: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "cloudinary").
    fn provider_type(&self) -> &str;

    /// Upload an image and return where it now lives.
    ///
    /// `payload` is either a `data:` URI carrying base64 image bytes or an
    /// http(s) URL the host should fetch.
    async fn upload_image(&self, payload: &str) -> AppResult<UploadedMedia>;
}
