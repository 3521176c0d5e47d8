//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chatline_core::config::AppConfig;
use chatline_realtime::RealtimeEngine;
use chatline_service::IdentityService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Signup, login, token checks and profile updates
    pub identity: Arc<IdentityService>,
    /// WebSocket presence engine
    pub realtime: Arc<RealtimeEngine>,
}
