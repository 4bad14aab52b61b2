//! # darpan-cli — CLI Tool for the Darpan Stack
//!
//! Provides the `darpan` command-line interface binding the offline
//! pipeline, the API service, and the dashboard client.
//!
//! ## Subcommands
//!
//! - `darpan ingest` — Multi-stream CSV sanitization into the processed
//!   dataset.
//! - `darpan forecast` — Per-state volume projections into the forecast
//!   store.
//! - `darpan serve` — Run the dashboard API.
//! - `darpan regions` — Fetch and print the state/district index.
//! - `darpan heatmap` — Fetch and print the national classification table.
//! - `darpan audit` — Fetch a region's report and render the dashboard as
//!   text.
//!
//! ```bash
//! darpan ingest --raw-dir data/raw_csvs --out data/processed_metrics.json
//! darpan forecast
//! darpan serve --port 5001
//! darpan audit --state kerala --district ernakulam
//! ```

pub mod forecast;
pub mod ingest;
pub mod serve;
pub mod show;
