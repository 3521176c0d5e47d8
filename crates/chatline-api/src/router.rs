//! Route definitions for the Chatline HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket upgrade lives at
//! `/ws`. The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .route("/status", get(handlers::status::status))
        .route("/presence", get(handlers::presence::online_users));

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_upgrade))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: signup, login, check, update
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/check", get(handlers::auth::check_auth))
        .route("/auth/update", put(handlers::auth::update_profile))
}
