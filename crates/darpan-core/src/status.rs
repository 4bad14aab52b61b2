//! # Pillar Status & Trend Labels
//!
//! Categorical classifications carried on every audit card and heatmap
//! entry. Serialized in `SCREAMING_SNAKE_CASE` to match the dashboard wire
//! contract, which predates this implementation.

use serde::{Deserialize, Serialize};

/// Three-level classification for a pillar metric or a heatmap state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PillarStatus {
    /// Metric is inside the healthy band.
    Safe,
    /// Metric has crossed the warning threshold.
    Warning,
    /// Metric has crossed the critical threshold.
    Critical,
}

impl PillarStatus {
    /// Return the wire-format string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }

    /// Hex fill color for tiles and choropleth regions.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Safe => "#2E7D32",
            Self::Warning => "#F9A825",
            Self::Critical => "#C62828",
        }
    }
}

impl std::fmt::Display for PillarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction label attached to a state's volume forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendLabel {
    /// Forecast ends above where it starts.
    Upward,
    /// Forecast is flat or declining.
    Stable,
    /// No forecast was available for the state.
    Unknown,
}

impl TrendLabel {
    /// Return the wire-format string for this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upward => "UPWARD",
            Self::Stable => "STABLE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
