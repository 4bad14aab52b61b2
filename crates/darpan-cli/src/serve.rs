//! # Serve CLI — run the dashboard API service.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use darpan_api::state::{AppConfig, AppState};

/// Serve subcommand arguments.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to bind.
    #[arg(long, default_value_t = 5001)]
    pub port: u16,

    /// Path of the processed metrics document.
    #[arg(long, default_value = "data/processed_metrics.json")]
    pub data: PathBuf,

    /// Path of the forecast store document.
    #[arg(long, default_value = "data/load_forecast.json")]
    pub forecasts: PathBuf,
}

/// Execute the serve subcommand. Runs until interrupted.
pub async fn run_serve(args: &ServeArgs) -> Result<u8> {
    let config = AppConfig {
        port: args.port,
        data_path: args.data.clone(),
        forecast_path: args.forecasts.clone(),
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let state = AppState::with_config(config);
    state.hydrate();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    println!("darpan-api listening on {addr}");

    axum::serve(listener, darpan_api::app(state))
        .await
        .context("server error")?;
    Ok(0)
}
