//! # darpan-core — Domain Model for the Darpan Stack
//!
//! Darpan visualizes region-level enrollment and service-update statistics
//! for India's 36 states and union territories. This crate holds everything
//! the other crates agree on:
//!
//! - **Regions** — validated, canonicalized state and district names
//!   ([`StateName`], [`DistrictName`]) with the official entity list and
//!   the alias fold used to sanitize raw government CSV exports.
//! - **Statuses** — the three-level pillar classification
//!   ([`PillarStatus`]) and forecast trend labels ([`TrendLabel`]),
//!   including the categorical→color mapping the dashboard tiles and the
//!   choropleth use.
//! - **Metrics** — the processed per-district record ([`DistrictMetrics`])
//!   and the loaded [`Dataset`] with state-level weighted rollups.
//! - **Analysis** — the pillar engine ([`analyze`]) that turns a region's
//!   volume, youth ratio, and forecast into the audit report cards.
//!
//! ## Data Flow
//!
//! ```text
//! raw CSVs ──(darpan-etl)──> Dataset ──(darpan-forecast)──> ForecastStore
//!                               │                                │
//!                               └────────(darpan-api)────────────┘
//!                                           │
//!                                  audit cards / heatmap
//!                                           │
//!                                    (darpan-client)
//! ```

pub mod analysis;
pub mod error;
pub mod metrics;
pub mod region;
pub mod status;

pub use analysis::{
    analyze, round_to, saturation_status, velocity_status, AuditCards, EfficiencyCard,
    InclusivityCard, SecurityCard, StateForecast,
};
pub use error::ValidationError;
pub use metrics::{Dataset, DatasetError, DistrictMetrics, StateRollup};
pub use region::{DistrictName, StateName, OFFICIAL_STATES};
pub use status::{PillarStatus, TrendLabel};
