//! # Loaded Payload Types
//!
//! Typed forms of the three dashboard payloads. Keys stay plain strings —
//! the client renders whatever the service reports and never re-validates
//! region names on its side.

use std::collections::BTreeMap;

use serde::Deserialize;

use darpan_core::{AuditCards, PillarStatus};

/// The state → district index behind the region pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionIndex {
    index: BTreeMap<String, Vec<String>>,
}

impl RegionIndex {
    pub(crate) fn new(index: BTreeMap<String, Vec<String>>) -> Self {
        Self { index }
    }

    /// State names, sorted.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Districts of one state, or `None` for an unknown state.
    pub fn districts_of(&self, state: &str) -> Option<&[String]> {
        self.index.get(state).map(Vec::as_slice)
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// One state's entry in the heatmap payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeatmapCell {
    /// Enrollment-weighted youth ratio.
    pub ratio: f64,
    /// Saturation classification.
    pub status: PillarStatus,
}

/// The per-state classification behind the choropleth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapReport {
    states: BTreeMap<String, HeatmapCell>,
}

impl HeatmapReport {
    pub(crate) fn new(states: BTreeMap<String, HeatmapCell>) -> Self {
        Self { states }
    }

    /// One state's cell.
    pub fn get(&self, state: &str) -> Option<&HeatmapCell> {
        self.states.get(state)
    }

    /// Iterate cells in state order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeatmapCell)> {
        self.states.iter().map(|(state, cell)| (state.as_str(), cell))
    }

    /// Number of states classified.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// A loaded audit report: the region label and its pillar cards.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    /// The region the report describes (state or district name).
    pub location: String,
    /// The three pillar cards.
    pub cards: AuditCards,
}
