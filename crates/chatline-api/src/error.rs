//! Maps domain `AppError` to HTTP responses.
//!
//! Failures are reported in the body, not the status line: every error is
//! `200 OK` with `{"success": false, "message": ..., "error": KIND}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use chatline_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable error code.
    pub error: String,
}

/// Wrapper that lets handlers return `AppError` with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.kind {
            ErrorKind::Service | ErrorKind::Configuration => {
                tracing::error!(error = %err, source = ?err.source, "Request failed");
            }
            _ => tracing::debug!(error = %err, "Request rejected"),
        }

        Json(ApiErrorResponse {
            success: false,
            message: err.message,
            error: err.kind.as_code().to_string(),
        })
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_errors_are_reported_with_ok_status() {
        let response = ApiError(AppError::duplicate_user("User already exists")).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
