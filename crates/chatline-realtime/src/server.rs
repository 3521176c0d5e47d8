//! Top-level real-time engine.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::info;

use chatline_core::types::UserId;

use crate::connection::handle::ConnectionHandle;
use crate::connection::lifecycle::ConnectionLifecycle;
use crate::message::types::OutboundMessage;
use crate::presence::registry::PresenceRegistry;

/// Owns the presence registry and the shutdown signal for socket tasks.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    /// Presence registry.
    pub presence: Arc<PresenceRegistry>,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl Default for RealtimeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RealtimeEngine {
    /// Creates a new real-time engine.
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        info!("Real-time engine initialized");

        Self {
            presence: Arc::new(PresenceRegistry::new()),
            shutdown_tx,
        }
    }

    /// Registers a new socket and returns its handle and outbox receiver.
    ///
    /// The receiver already holds the snapshot taken when the socket joined.
    pub async fn open(
        &self,
        user_id: Option<UserId>,
    ) -> (Arc<ConnectionHandle>, watch::Receiver<Option<OutboundMessage>>) {
        let (handle, rx) = ConnectionHandle::channel(user_id);
        let handle = Arc::new(handle);
        self.presence.on_open(user_id, handle.clone()).await;
        (handle, rx)
    }

    /// Unregisters a socket.
    pub async fn close(&self, handle: &ConnectionHandle) {
        handle.mark_dead();
        self.presence.on_close(handle.user_id, handle.id).await;
    }

    /// Returns a shutdown receiver for socket tasks to select on.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Tells every socket task to stop and forgets all connections.
    pub async fn shutdown(&self) {
        info!("Shutting down real-time engine");
        let _ = self.shutdown_tx.send(());
        self.presence.close_all().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_sends_initial_snapshot() {
        let engine = RealtimeEngine::new();
        let user = UserId::new();

        let (handle, mut rx) = engine.open(Some(user)).await;
        rx.changed().await.unwrap();
        assert_eq!(
            *rx.borrow_and_update(),
            Some(OutboundMessage::GetOnlineUsers(vec![user]))
        );

        engine.close(&handle).await;
        assert!(engine.presence.online_users().await.is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_signals_receivers() {
        let engine = RealtimeEngine::new();
        let mut shutdown = engine.shutdown_receiver();
        engine.shutdown().await;
        assert!(shutdown.recv().await.is_ok());
    }
}
