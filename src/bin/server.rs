//! Motorcast Server - vehicle forecast HTTP API
//!
//! Loads the trained population model once at startup, derives the
//! vehicles-per-person ratio and serves predictions until Ctrl+C.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=models/linear_VIC.json PORT=8080 cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `HOST` / `PORT` - Listener address (default: 0.0.0.0:8080)
//! - `MODEL_PATH` - Explicit model artifact, tried before `MODEL_DIR` candidates
//! - `DATABASE_URL` - Parking database (or `DB_HOST`, `DB_PORT`, ...)
//! - `METRICS_ENABLED` - Expose `/metrics` (default: true)

use anyhow::{Context, Result};
use motorcast::application::AppState;
use motorcast::config::Config;
use motorcast::interfaces::http;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Motorcast Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Listen={}:{}, Years={}..={}, Metrics={}",
        config.server.host,
        config.server.port,
        config.model.year_min,
        config.model.year_max,
        config.observability.metrics_enabled
    );

    // Model and ratio are resolved before binding; failures abort startup.
    let state = AppState::build(&config)?;
    info!(
        "Average vehicles per person: {:.6}",
        state.forecast.avg_ratio()
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received. Exiting...");
}
