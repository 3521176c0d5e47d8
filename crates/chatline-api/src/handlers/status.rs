//! Liveness check.

/// GET /api/status
pub async fn status() -> &'static str {
    "server is running"
}
