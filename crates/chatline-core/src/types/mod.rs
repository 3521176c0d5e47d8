//! Core type definitions used across the Chatline workspace.

pub mod id;

pub use id::{ConnectionId, UserId};
