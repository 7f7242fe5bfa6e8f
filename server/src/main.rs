//! Todolist HTTP server.
//!
//! Server-rendered to-do list backed by `PostgreSQL`, with flash messages
//! kept in an in-memory session store.

mod config;

use axum::{extract::Request, ServiceExt};
use config::{Config, DEFAULT_LOG_FILTER};
use todolist_postgres::PostgresTodoStore;
use todolist_web::{build_app, flash, AppState, Views};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting todolist server");
    info!(
        address = %config.server.address(),
        max_connections = config.postgres.max_connections,
        flash_ttl_secs = config.session.flash_ttl_secs,
        "Configuration loaded"
    );

    info!("Connecting to database...");
    let store = PostgresTodoStore::connect(
        &config.postgres.url,
        config.postgres.max_connections,
        config.postgres.acquire_timeout(),
    )
    .await?;
    store.migrate().await?;
    info!("Database ready");

    let state = AppState::new(store, Views::new(config.server.creator.clone())?);
    let app = build_app(
        state,
        flash::session_layer(config.session.flash_ttl_secs, config.session.secure_cookie),
    );

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Todo app listening");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
