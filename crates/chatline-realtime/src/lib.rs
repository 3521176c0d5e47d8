//! # chatline-realtime
//!
//! Real-time presence for Chatline. Tracks which users have a live socket
//! and pushes the full online set to every connected client whenever it
//! changes.

pub mod connection;
pub mod message;
pub mod presence;
pub mod server;

pub use connection::{ConnectionHandle, ConnectionLifecycle};
pub use message::OutboundMessage;
pub use presence::PresenceRegistry;
pub use server::RealtimeEngine;
