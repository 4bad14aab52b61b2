//! # Ingest CLI — run the multi-stream sanitization pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use darpan_etl::IngestConfig;

/// Ingest subcommand arguments.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Root directory holding the enrolment/, demographic/, and
    /// biometric/ stream directories.
    #[arg(long, default_value = "data/raw_csvs")]
    pub raw_dir: PathBuf,

    /// Output path for the processed metrics document.
    #[arg(long, default_value = "data/processed_metrics.json")]
    pub out: PathBuf,
}

/// Execute the ingest subcommand.
pub fn run_ingest(args: &IngestArgs) -> Result<u8> {
    let config = IngestConfig {
        raw_dir: args.raw_dir.clone(),
        output: args.out.clone(),
    };
    let summary = darpan_etl::run(&config).context("ingest failed")?;

    println!(
        "Processed {} districts across {} states ({} rows dropped).",
        summary.districts, summary.states, summary.dropped_rows
    );
    println!("Dataset written to {}", args.out.display());
    Ok(0)
}
