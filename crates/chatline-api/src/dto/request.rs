//! Request DTOs.
//!
//! JSON bodies deserialize straight into the service inputs
//! ([`chatline_service::Registration`] and friends); only transport-level
//! shapes live here.

use serde::Deserialize;

use chatline_core::types::UserId;

/// Query string of the WebSocket upgrade.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WsQuery {
    /// Raw `userId` parameter, if any.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl WsQuery {
    /// The identified user, or `None` for observers. Unparseable ids are
    /// treated as absent.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id.as_deref().and_then(|raw| raw.parse().ok())
    }
}
