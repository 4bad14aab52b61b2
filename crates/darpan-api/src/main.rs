//! # darpan-api entry point
//!
//! Loads configuration from the environment, hydrates the data artifacts,
//! and serves the dashboard API.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use darpan_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let state = AppState::with_config(config);
    state.hydrate();

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, "failed to bind: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "darpan-api listening");

    if let Err(e) = axum::serve(listener, darpan_api::app(state)).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
