//! Hooks the socket layer calls as connections come and go.

use std::sync::Arc;

use async_trait::async_trait;

use chatline_core::types::{ConnectionId, UserId};

use super::handle::ConnectionHandle;

/// Reacts to sockets opening and closing.
///
/// `user_id` is `None` for observer connections that did not identify a
/// user. Closing a connection that was never opened, or closing it twice,
/// is a no-op.
#[async_trait]
pub trait ConnectionLifecycle: Send + Sync + 'static {
    /// A socket finished its handshake.
    async fn on_open(&self, user_id: Option<UserId>, handle: Arc<ConnectionHandle>);

    /// A socket closed, cleanly or not.
    async fn on_close(&self, user_id: Option<UserId>, connection_id: ConnectionId);
}
