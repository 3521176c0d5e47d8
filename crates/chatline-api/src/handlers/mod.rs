//! HTTP and WebSocket handlers.

pub mod auth;
pub mod presence;
pub mod status;
pub mod ws;
