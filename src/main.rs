//! Chatline Server: accounts, profiles and realtime presence for a chat app.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use chatline_api::{AppState, build_router};
use chatline_core::config::AppConfig;
use chatline_core::error::{AppError, ErrorKind};
use chatline_database::connect_user_store;
use chatline_realtime::RealtimeEngine;
use chatline_service::IdentityService;
use chatline_storage::connect_media_host;

#[tokio::main]
async fn main() {
    let env = std::env::var("CHATLINE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Chatline v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: User store ───────────────────────────────────────
    tracing::info!(provider = %config.database.provider, "Initializing user store...");
    let store = connect_user_store(&config.database).await?;

    // ── Step 2: Media host ───────────────────────────────────────
    let media = connect_media_host(&config.media)?;

    // ── Step 3: Identity service ─────────────────────────────────
    let identity = Arc::new(IdentityService::new(store, media, &config.auth)?);

    // ── Step 4: Realtime engine ──────────────────────────────────
    let realtime = Arc::new(RealtimeEngine::new());

    // ── Step 5: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = AppState {
        config: Arc::new(config),
        identity,
        realtime: Arc::clone(&realtime),
    };
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, format!("Failed to bind {addr}"), e)
    })?;

    tracing::info!("Chatline server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        realtime.shutdown().await;
    });

    server
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Service, "Server error", e))?;

    tracing::info!("Chatline server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
