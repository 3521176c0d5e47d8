//! Outbound WebSocket frames.

use serde::{Deserialize, Serialize};

use chatline_core::result::AppResult;
use chatline_core::types::UserId;

/// Messages sent by the server to the client.
///
/// Serialized as `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundMessage {
    /// Full set of users that currently have a live connection.
    #[serde(rename = "getOnlineUsers")]
    GetOnlineUsers(Vec<UserId>),
}

impl OutboundMessage {
    /// Encode as a JSON text frame.
    pub fn to_frame(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_online_users_frame_shape() {
        let id: UserId = "7d3f5a8e-2c41-4b7a-9f0e-1a2b3c4d5e6f".parse().unwrap();
        let frame = OutboundMessage::GetOnlineUsers(vec![id]).to_frame().unwrap();
        assert_eq!(
            frame,
            r#"{"event":"getOnlineUsers","data":["7d3f5a8e-2c41-4b7a-9f0e-1a2b3c4d5e6f"]}"#
        );
    }

    #[test]
    fn test_empty_set_is_empty_array() {
        let frame = OutboundMessage::GetOnlineUsers(Vec::new()).to_frame().unwrap();
        assert_eq!(frame, r#"{"event":"getOnlineUsers","data":[]}"#);
    }
}
