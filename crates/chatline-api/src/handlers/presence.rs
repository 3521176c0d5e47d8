//! Presence diagnostics.

use axum::Json;
use axum::extract::State;

use crate::dto::response::OnlineUsersResponse;
use crate::state::AppState;

/// GET /api/presence
pub async fn online_users(State(state): State<AppState>) -> Json<OnlineUsersResponse> {
    Json(OnlineUsersResponse {
        success: true,
        online_users: state.realtime.presence.online_users().await,
    })
}
