//! `AuthUser` extractor: resolves the session token to a user profile.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use chatline_entity::user::UserProfile;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the raw session token.
pub const TOKEN_HEADER: &str = "token";

/// The authenticated user, available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserProfile);

impl std::ops::Deref for AuthUser {
    type Target = UserProfile;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Reads the token from the `token` header, falling back to
/// `Authorization: Bearer <token>`.
pub fn token_from_parts(parts: &Parts) -> Option<&str> {
    if let Some(token) = parts
        .headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return Some(token);
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let profile = state
            .identity
            .verify_token(token_from_parts(parts))
            .await?;
        Ok(AuthUser(profile))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder();
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_token_header_wins() {
        let p = parts(&[("token", "abc"), ("authorization", "Bearer xyz")]);
        assert_eq!(token_from_parts(&p), Some("abc"));
    }

    #[test]
    fn test_bearer_fallback() {
        let p = parts(&[("authorization", "Bearer xyz")]);
        assert_eq!(token_from_parts(&p), Some("xyz"));

        let p = parts(&[("authorization", "Basic xyz")]);
        assert_eq!(token_from_parts(&p), None);
    }
}
