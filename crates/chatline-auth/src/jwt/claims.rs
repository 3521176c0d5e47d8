//! Claims carried by a session token.

use serde::{Deserialize, Serialize};

use chatline_core::types::UserId;

/// Payload of a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}
