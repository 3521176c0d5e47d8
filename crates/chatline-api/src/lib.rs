//! # chatline-api
//!
//! HTTP API layer for Chatline built on Axum.
//!
//! Provides the auth endpoints, the liveness and presence endpoints, the
//! WebSocket upgrade, middleware (CORS, logging), extractors, DTOs, and
//! error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
