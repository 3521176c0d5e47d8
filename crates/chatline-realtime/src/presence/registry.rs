//! Presence registry: which users are online, and who gets told.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use chatline_core::types::{ConnectionId, UserId};

use crate::connection::handle::ConnectionHandle;
use crate::connection::lifecycle::ConnectionLifecycle;
use crate::message::types::OutboundMessage;

#[derive(Debug, Default)]
struct PresenceState {
    /// User → the connection that most recently claimed that user.
    online: HashMap<UserId, Arc<ConnectionHandle>>,
    /// Every live connection, identified or not.
    subscribers: HashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl PresenceState {
    fn online_users(&self) -> Vec<UserId> {
        self.online.keys().copied().collect()
    }

    /// Push the online set to every subscriber, dropping closed ones.
    fn broadcast(&mut self) {
        let message = OutboundMessage::GetOnlineUsers(self.online_users());
        self.subscribers.retain(|_, handle| {
            handle.send(message.clone());
            handle.is_alive()
        });
    }
}

/// Tracks online users and fans out `getOnlineUsers` on every change.
///
/// Mutation, snapshot and fan-out all happen under one write lock, so
/// broadcasts leave in the order the mutations happened and each reflects
/// a consistent map. Sends never block.
///
/// A user has at most one entry. A second connection for the same user
/// replaces the first one's entry, and whichever of them closes first
/// removes the user from the online set.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    state: RwLock<PresenceState>,
}

impl PresenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the users currently online. Order is unspecified.
    pub async fn online_users(&self) -> Vec<UserId> {
        self.state.read().await.online_users()
    }

    /// Number of open sockets, observers included.
    pub async fn connection_count(&self) -> usize {
        self.state.read().await.subscribers.len()
    }

    /// Send the current online set to every connection.
    pub async fn broadcast_online_users(&self) {
        self.state.write().await.broadcast();
    }

    /// Forget every connection. Their queues close once the socket tasks
    /// drop their own handles.
    pub async fn close_all(&self) {
        let mut state = self.state.write().await;
        for handle in state.subscribers.values() {
            handle.mark_dead();
        }
        let count = state.subscribers.len();
        state.subscribers.clear();
        state.online.clear();
        info!(connections = count, "Closed all presence connections");
    }
}

#[async_trait]
impl ConnectionLifecycle for PresenceRegistry {
    async fn on_open(&self, user_id: Option<UserId>, handle: Arc<ConnectionHandle>) {
        let mut state = self.state.write().await;
        state.subscribers.insert(handle.id, handle.clone());
        if let Some(user_id) = user_id {
            if let Some(previous) = state.online.insert(user_id, handle.clone()) {
                debug!(%user_id, superseded = %previous.id, "User reconnected");
            }
        }
        debug!(connection_id = %handle.id, ?user_id, online = state.online.len(), "Connection opened");
        state.broadcast();
    }

    async fn on_close(&self, user_id: Option<UserId>, connection_id: ConnectionId) {
        let mut state = self.state.write().await;
        state.subscribers.remove(&connection_id);
        if let Some(user_id) = user_id {
            state.online.remove(&user_id);
        }
        debug!(%connection_id, ?user_id, online = state.online.len(), "Connection closed");
        state.broadcast();
    }
}
