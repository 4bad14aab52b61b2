//! # darpan-etl — Multi-Stream Sanitization Pipeline
//!
//! Turns the raw chunked CSV exports into the processed dataset the rest
//! of the stack consumes. Three streams feed the pipeline, each a
//! directory of CSV chunks under the raw-data root:
//!
//! - `enrolment/` — age-banded enrollment counts per district per day.
//! - `demographic/` — demographic update volumes.
//! - `biometric/` — biometric update volumes.
//!
//! ## Aggregation Strategy
//!
//! Daily rows are summed into monthly totals per district, and the mean
//! across months is kept — the "monthly pulse". Summing across the whole
//! export window would inflate every figure by the number of months
//! covered; the mean keeps districts with different coverage comparable.
//!
//! ## Sanitization
//!
//! State names are canonicalized against the official entity list (alias
//! fold included); rows whose region names fail cleaning, or whose dates
//! do not parse, are dropped and counted. Districts from the
//! pre-bifurcation Telangana set are reassigned to TELANGANA.

pub mod pipeline;
pub mod records;

pub use pipeline::{run, EtlError, IngestConfig, IngestSummary};
