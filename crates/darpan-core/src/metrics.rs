//! # Processed District Metrics
//!
//! The dataset produced by the ingest pipeline and served by the API:
//! one record per (state, district) with monthly-mean enrollment figures
//! and the derived youth ratio and update volume.
//!
//! Field names on the wire keep the capitalized `State`/`District` spelling
//! of the historical export format; everything else is lowercase.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::region::{DistrictName, StateName};

/// One processed record: the monthly-mean pulse of a district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictMetrics {
    #[serde(rename = "State")]
    pub state: StateName,
    #[serde(rename = "District")]
    pub district: DistrictName,
    /// Mean monthly enrollment across all age bands.
    pub total_enrolment: f64,
    /// Mean monthly enrollment in the 0–17 bands.
    pub youth_count: f64,
    /// Youth share of enrollment, clamped by the ingest pipeline.
    pub ratio: f64,
    /// Mean monthly demographic + biometric update volume.
    pub mobile_update_volume: f64,
}

/// Enrollment-weighted rollup of a state's districts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateRollup {
    /// Summed mean monthly enrollment.
    pub total_enrolment: f64,
    /// Enrollment-weighted mean youth ratio; 0 when enrollment sums to 0.
    pub weighted_ratio: f64,
    /// Summed mean monthly update volume.
    pub update_volume: f64,
}

/// Errors loading or persisting the processed dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Filesystem read/write failure.
    #[error("failed to access dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid metrics document.
    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The loaded processed dataset.
///
/// Lookups take plain `&str` keys because the API compares the caller's
/// trimmed, uppercased input against canonical record names directly —
/// no alias folding happens after ingest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<DistrictMetrics>,
}

impl Dataset {
    /// Wrap a set of processed records.
    pub fn new(records: Vec<DistrictMetrics>) -> Self {
        Self { records }
    }

    /// Load the dataset from a JSON document written by the ingest pipeline.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist the dataset as JSON, atomically (write temp file, rename).
    pub fn save(&self, path: &Path) -> Result<(), DatasetError> {
        let body = serde_json::to_vec_pretty(&self.records).map_err(|source| {
            DatasetError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        };
        std::fs::write(&tmp, body).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)
    }

    /// All records, in storage order.
    pub fn records(&self) -> &[DistrictMetrics] {
        &self.records
    }

    /// Number of district records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct states present in the dataset.
    pub fn states(&self) -> BTreeSet<&StateName> {
        self.records.iter().map(|r| &r.state).collect()
    }

    /// Sorted state → sorted unique district-name index.
    pub fn region_index(&self) -> BTreeMap<String, Vec<String>> {
        let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for record in &self.records {
            index
                .entry(record.state.as_str().to_string())
                .or_default()
                .insert(record.district.as_str().to_string());
        }
        index
            .into_iter()
            .map(|(state, districts)| (state, districts.into_iter().collect()))
            .collect()
    }

    /// Find a district record by exact canonical names.
    pub fn district(&self, state: &str, district: &str) -> Option<&DistrictMetrics> {
        self.records
            .iter()
            .find(|r| r.state.as_str() == state && r.district.as_str() == district)
    }

    /// Enrollment-weighted rollup for one state; `None` when the state has
    /// no records.
    pub fn state_rollup(&self, state: &str) -> Option<StateRollup> {
        let mut total = 0.0;
        let mut weighted = 0.0;
        let mut volume = 0.0;
        let mut seen = false;
        for record in self.records.iter().filter(|r| r.state.as_str() == state) {
            seen = true;
            total += record.total_enrolment;
            weighted += record.ratio * record.total_enrolment;
            volume += record.mobile_update_volume;
        }
        if !seen {
            return None;
        }
        let weighted_ratio = if total > 0.0 { weighted / total } else { 0.0 };
        Some(StateRollup {
            total_enrolment: total,
            weighted_ratio,
            update_volume: volume,
        })
    }

    /// Rollups for every state, keyed by canonical name.
    pub fn state_rollups(&self) -> BTreeMap<String, StateRollup> {
        self.states()
            .into_iter()
            .filter_map(|state| {
                self.state_rollup(state.as_str())
                    .map(|rollup| (state.as_str().to_string(), rollup))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, district: &str, total: f64, ratio: f64, volume: f64) -> DistrictMetrics {
        DistrictMetrics {
            state: StateName::canonical(state).unwrap(),
            district: DistrictName::new(district).unwrap(),
            total_enrolment: total,
            youth_count: total * ratio,
            ratio,
            mobile_update_volume: volume,
        }
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            record("KERALA", "ERNAKULAM", 1000.0, 0.4, 500.0),
            record("KERALA", "KOLLAM", 3000.0, 0.8, 700.0),
            record("GOA", "NORTH GOA", 200.0, 0.3, 90.0),
        ])
    }

    #[test]
    fn region_index_is_sorted_and_unique() {
        let mut dataset = sample();
        // Duplicate district rows collapse in the index.
        dataset
            .records
            .push(record("KERALA", "ERNAKULAM", 10.0, 0.5, 1.0));
        let index = dataset.region_index();
        let states: Vec<&String> = index.keys().collect();
        assert_eq!(states, ["GOA", "KERALA"]);
        assert_eq!(index["KERALA"], ["ERNAKULAM", "KOLLAM"]);
    }

    #[test]
    fn district_lookup_exact_match() {
        let dataset = sample();
        assert!(dataset.district("KERALA", "KOLLAM").is_some());
        assert!(dataset.district("KERALA", "KOCHI").is_none());
        assert!(dataset.district("GOA", "KOLLAM").is_none());
    }

    #[test]
    fn state_rollup_weights_ratio_by_enrollment() {
        let dataset = sample();
        let rollup = dataset.state_rollup("KERALA").unwrap();
        assert_eq!(rollup.total_enrolment, 4000.0);
        // (0.4*1000 + 0.8*3000) / 4000 = 0.7
        assert!((rollup.weighted_ratio - 0.7).abs() < 1e-12);
        assert_eq!(rollup.update_volume, 1200.0);
    }

    #[test]
    fn state_rollup_unknown_state_is_none() {
        assert!(sample().state_rollup("BIHAR").is_none());
    }

    #[test]
    fn state_rollup_zero_enrollment_ratio_is_zero() {
        let dataset = Dataset::new(vec![record("GOA", "NORTH GOA", 0.0, 0.5, 10.0)]);
        let rollup = dataset.state_rollup("GOA").unwrap();
        assert_eq!(rollup.weighted_ratio, 0.0);
    }

    #[test]
    fn state_rollups_covers_every_state() {
        let rollups = sample().state_rollups();
        assert_eq!(rollups.len(), 2);
        assert!(rollups.contains_key("GOA"));
        assert!(rollups.contains_key("KERALA"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_metrics.json");
        let dataset = sample();
        dataset.save(&path).unwrap();
        let loaded = Dataset::load(&path).unwrap();
        assert_eq!(loaded, dataset);
        // The temp file is gone after the rename.
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn load_rejects_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"{\"not\": \"an array\"}").unwrap();
        let err = Dataset::load(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
    }

    #[test]
    fn wire_field_names_keep_export_spelling() {
        let dataset = Dataset::new(vec![record("GOA", "NORTH GOA", 1.0, 0.5, 2.0)]);
        let json = serde_json::to_string(&dataset).unwrap();
        assert!(json.contains("\"State\""));
        assert!(json.contains("\"District\""));
        assert!(json.contains("\"total_enrolment\""));
        assert!(json.contains("\"mobile_update_volume\""));
    }
}
