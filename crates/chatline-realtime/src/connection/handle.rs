//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use chatline_core::types::{ConnectionId, UserId};

use crate::message::types::OutboundMessage;

/// A handle to a single WebSocket connection.
///
/// Holds the sending half of a single-slot outbox. Every frame the server
/// pushes is a full snapshot, so a newer frame replaces one the socket task
/// has not written yet instead of queueing behind it.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// User who owns this connection, if the client identified itself
    pub user_id: Option<UserId>,
    /// Latest outbound frame, `None` until the first broadcast
    outbox: watch::Sender<Option<OutboundMessage>>,
    /// Whether the connection is still alive
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a handle together with the receiver its socket task drains.
    pub fn channel(user_id: Option<UserId>) -> (Self, watch::Receiver<Option<OutboundMessage>>) {
        let (outbox, rx) = watch::channel(None);
        let handle = Self {
            id: ConnectionId::new(),
            user_id,
            outbox,
            alive: AtomicBool::new(true),
        };
        (handle, rx)
    }

    /// Publish a frame without waiting, replacing any unsent one.
    ///
    /// Returns `false` if the socket task has gone away; the handle is then
    /// marked dead.
    pub fn send(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        if self.outbox.send(Some(msg)).is_err() {
            self.mark_dead();
            return false;
        }
        true
    }

    /// Check if connection is alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark connection as dead
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unread_frame_is_replaced_by_newer_one() {
        let (handle, mut rx) = ConnectionHandle::channel(None);
        let user = UserId::new();

        assert!(handle.send(OutboundMessage::GetOnlineUsers(vec![])));
        assert!(handle.send(OutboundMessage::GetOnlineUsers(vec![user])));

        rx.changed().await.unwrap();
        assert_eq!(
            *rx.borrow_and_update(),
            Some(OutboundMessage::GetOnlineUsers(vec![user]))
        );
        assert!(!rx.has_changed().unwrap());
        assert!(handle.is_alive());
    }

    #[test]
    fn test_closed_receiver_marks_dead() {
        let (handle, rx) = ConnectionHandle::channel(Some(UserId::new()));
        drop(rx);
        assert!(!handle.send(OutboundMessage::GetOnlineUsers(vec![])));
        assert!(!handle.is_alive());
    }
}
