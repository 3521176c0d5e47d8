//! Validation of the image payloads clients submit.

use reqwest::Url;

use chatline_core::error::AppError;
use chatline_core::result::AppResult;

/// The two payload shapes a media host accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// `data:<mime>;base64,<bytes>` as produced by a browser file reader.
    DataUri,
    /// A remote http(s) URL the host fetches itself.
    RemoteUrl,
}

/// Classify a payload, rejecting anything the host could not ingest.
///
/// Runs before any network call so malformed input is a validation error
/// rather than a failed upload.
pub fn classify(payload: &str) -> AppResult<PayloadKind> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(AppError::validation("Profile picture is empty"));
    }

    if let Some(rest) = payload.strip_prefix("data:") {
        let (header, body) = rest
            .split_once(',')
            .ok_or_else(|| AppError::validation("Malformed data URI"))?;
        if !header.starts_with("image/") {
            return Err(AppError::validation("Data URI is not an image"));
        }
        if body.is_empty() {
            return Err(AppError::validation("Data URI carries no data"));
        }
        return Ok(PayloadKind::DataUri);
    }

    match Url::parse(payload) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Ok(PayloadKind::RemoteUrl)
        }
        _ => Err(AppError::validation(
            "Profile picture must be a data URI or an http(s) URL",
        )),
    }
}

#[cfg(test)]
mod tests {
    use chatline_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_accepts_image_data_uri() {
        assert_eq!(
            classify("data:image/png;base64,iVBORw0KGgo=").unwrap(),
            PayloadKind::DataUri
        );
    }

    #[test]
    fn test_accepts_remote_url() {
        assert_eq!(
            classify("https://cdn.example.com/a.jpg").unwrap(),
            PayloadKind::RemoteUrl
        );
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in [
            "",
            "   ",
            "not a picture",
            "data:text/plain;base64,aGk=",
            "data:image/png;base64,",
            "ftp://example.com/a.png",
        ] {
            let err = classify(bad).unwrap_err();
            assert!(err.is(ErrorKind::Validation), "accepted {bad:?}");
        }
    }
}
