//! # Forecast CLI — build the per-state forecast store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use darpan_core::Dataset;
use darpan_forecast::ForecastStore;

/// Forecast subcommand arguments.
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Path of the processed metrics document.
    #[arg(long, default_value = "data/processed_metrics.json")]
    pub data: PathBuf,

    /// Output path for the forecast store document.
    #[arg(long, default_value = "data/load_forecast.json")]
    pub out: PathBuf,
}

/// Execute the forecast subcommand.
pub fn run_forecast(args: &ForecastArgs) -> Result<u8> {
    let dataset = Dataset::load(&args.data).context("failed to load processed dataset")?;
    if dataset.is_empty() {
        anyhow::bail!("processed dataset {} holds no districts", args.data.display());
    }

    let store = ForecastStore::generate(&dataset);
    for (state, forecast) in store.iter() {
        println!(
            "  {:<42} accuracy {:>5.1}%  trend {}",
            state.as_str(),
            forecast.accuracy,
            forecast.trend
        );
    }

    store.save(&args.out).context("failed to write forecast store")?;
    println!();
    println!(
        "Forecast store written to {} ({} states).",
        args.out.display(),
        store.len()
    );
    Ok(0)
}
