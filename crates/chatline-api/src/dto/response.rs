//! Response DTOs.
//!
//! Successful responses carry `"success": true` next to their payload;
//! field names are what existing clients read.

use serde::{Deserialize, Serialize};

use chatline_core::types::UserId;
use chatline_entity::user::UserProfile;

/// Signup and login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// The signed-in user.
    pub user_data: UserProfile,
    /// Session token to send back in the `token` header.
    pub token: String,
}

/// Token check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAuthResponse {
    /// Always `true`.
    pub success: bool,
    /// The user the token belongs to.
    pub user: UserProfile,
}

/// Profile update response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// The profile after the update.
    pub updated_user: UserProfile,
}

/// Presence diagnostic response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineUsersResponse {
    /// Always `true`.
    pub success: bool,
    /// Users with a live socket.
    pub online_users: Vec<UserId>,
}
