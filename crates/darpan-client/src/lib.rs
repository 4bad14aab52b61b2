//! # darpan-client — Typed Client for the Dashboard API
//!
//! The three loaders every dashboard screen is built from:
//!
//! - [`DarpanClient::fetch_metadata`] — the state → district index.
//! - [`DarpanClient::fetch_heatmap`] — per-state saturation classification.
//! - [`DarpanClient::fetch_audit`] — the per-region audit report.
//!
//! Calls are independent; there is no retry policy, no caching, and no
//! coordination between fetches — a newer response simply replaces
//! whatever the caller held. One client-wide timeout bounds every call.
//!
//! The [`view`] module turns loaded payloads into chart-ready structures
//! (pie slices, forecast bars, status tiles, choropleth fills) without
//! binding to any widget toolkit.

pub mod client;
pub mod config;
pub mod error;
pub mod types;
pub mod view;

pub use client::DarpanClient;
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use types::{AuditReport, HeatmapCell, HeatmapReport, RegionIndex};
pub use view::{
    choropleth_fills, ChoroplethFill, DashboardView, DemographicPie, ForecastBar, StatusTile,
};
