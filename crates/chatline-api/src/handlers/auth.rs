//! Auth handlers: signup, login, check, profile update.

use axum::Json;
use axum::extract::State;

use chatline_service::{Credentials, ProfileUpdate, Registration};

use crate::dto::response::{CheckAuthResponse, SessionResponse, UpdateProfileResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<Registration>,
) -> Result<Json<SessionResponse>, ApiError> {
    let grant = state.identity.register(form).await?;

    Ok(Json(SessionResponse {
        success: true,
        message: "User created successfully".to_string(),
        user_data: grant.profile,
        token: grant.token,
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<Credentials>,
) -> Result<Json<SessionResponse>, ApiError> {
    let grant = state.identity.authenticate(form).await?;

    Ok(Json(SessionResponse {
        success: true,
        message: "Login successful".to_string(),
        user_data: grant.profile,
        token: grant.token,
    }))
}

/// GET /api/auth/check
pub async fn check_auth(AuthUser(user): AuthUser) -> Json<CheckAuthResponse> {
    Json(CheckAuthResponse {
        success: true,
        user,
    })
}

/// PUT /api/auth/update
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(form): ApiJson<ProfileUpdate>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let updated_user = state.identity.update_profile(auth.id, form).await?;

    Ok(Json(UpdateProfileResponse {
        success: true,
        message: "Profile updated successfully".to_string(),
        updated_user,
    }))
}
