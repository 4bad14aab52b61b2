//! # darpan CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity flags drive the tracing filter.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use darpan_cli::forecast::{run_forecast, ForecastArgs};
use darpan_cli::ingest::{run_ingest, IngestArgs};
use darpan_cli::serve::{run_serve, ServeArgs};
use darpan_cli::show::{run_audit, run_heatmap, run_regions, AuditArgs, HeatmapArgs, RegionsArgs};

/// Darpan Stack CLI
///
/// Regional enrollment analytics toolchain: CSV ingest, state-level
/// volume forecasting, the dashboard API service, and terminal rendering
/// of the dashboard payloads.
#[derive(Parser, Debug)]
#[command(name = "darpan", version = "0.3.1", about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the multi-stream CSV ingest and write the processed dataset.
    Ingest(IngestArgs),

    /// Build the per-state forecast store from the processed dataset.
    Forecast(ForecastArgs),

    /// Serve the dashboard API.
    Serve(ServeArgs),

    /// Fetch and print the state/district index.
    Regions(RegionsArgs),

    /// Fetch and print the national classification table.
    Heatmap(HeatmapArgs),

    /// Fetch a region's audit report and render the dashboard as text.
    Audit(AuditArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Ingest(args) => run_ingest(&args),
        Commands::Forecast(args) => run_forecast(&args),
        Commands::Serve(args) => run_serve(&args).await,
        Commands::Regions(args) => run_regions(&args).await,
        Commands::Heatmap(args) => run_heatmap(&args).await,
        Commands::Audit(args) => run_audit(&args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
