//! Inputs accepted by the identity service.
//!
//! Fields are optional because clients may omit them; the service decides
//! which ones are required. Blank strings count as absent.

use serde::Deserialize;

use chatline_core::error::AppError;
use chatline_core::result::AppResult;

/// Signup form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Email address.
    pub email: Option<String>,
    /// Full display name.
    pub full_name: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
    /// Optional picture payload (data URI or URL).
    pub profile_pic: Option<String>,
    /// Optional biography.
    pub bio: Option<String>,
}

/// Login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Profile update form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New full name.
    pub full_name: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New picture payload, uploaded before anything is stored.
    pub profile_pic: Option<String>,
}

/// Returns the trimmed value, or `None` if it is absent or blank.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Like [`present`] but a missing value is a validation error naming `field`.
pub(crate) fn required<'a>(value: &'a Option<String>, field: &str) -> AppResult<&'a str> {
    present(value).ok_or_else(|| AppError::validation(format!("Missing required field: {field}")))
}

/// Like [`required`] but returns the value untouched. Passwords are
/// checked for blankness only; surrounding spaces are part of the secret.
pub(crate) fn secret<'a>(value: &'a Option<String>, field: &str) -> AppResult<&'a str> {
    required(value, field)?;
    Ok(value.as_deref().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_counts_as_absent() {
        assert_eq!(present(&Some("  ".to_string())), None);
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some(" a@b.c ".to_string())), Some("a@b.c"));
    }

    #[test]
    fn test_secret_keeps_surrounding_spaces() {
        assert_eq!(secret(&Some(" pw ".to_string()), "password").unwrap(), " pw ");
        assert!(secret(&Some("   ".to_string()), "password").is_err());
        assert!(secret(&None, "password").is_err());
    }

    #[test]
    fn test_registration_reads_camel_case() {
        let form: Registration = serde_json::from_str(
            r#"{"email":"a@b.c","fullName":"A","password":"p","profilePic":"data:image/png;base64,AA"}"#,
        )
        .unwrap();
        assert_eq!(form.full_name.as_deref(), Some("A"));
        assert!(form.profile_pic.is_some());
        assert!(form.bio.is_none());
    }
}
