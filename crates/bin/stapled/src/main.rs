//! # stapled — staple daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (`staple.toml`, env vars)
//! - Initialise logging
//! - Make sure the request collection file exists
//! - Construct the store, the request service, and the axum router
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use staple_adapter_http_axum::router;
use staple_adapter_http_axum::state::AppState;
use staple_adapter_storage_json::Config as StorageConfig;
use staple_app::services::request_service::RequestService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Storage
    let store = StorageConfig {
        path: config.storage.path.clone(),
        strict_reads: config.storage.strict_reads,
    }
    .build()
    .await?;
    tracing::info!(
        path = %store.path().display(),
        strict_reads = config.storage.strict_reads,
        "request collection ready"
    );

    // HTTP
    let state = AppState::new(RequestService::new(store));
    let app = match config.existing_public_dir() {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "serving static assets");
            router::build_with_assets(state, dir)
        }
        None => router::build(state),
    };

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("staple API listening on http://{bind_addr}/api");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
