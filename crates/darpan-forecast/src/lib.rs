//! # darpan-forecast — State Load Forecasting
//!
//! Projects each state's mobile-update volume three months ahead, with a
//! backtest accuracy score and a trend label. The projections feed the
//! efficiency card of every audit report and the fallback paths of the
//! API's forecast handshake.
//!
//! The [`ForecastStore`] is a JSON document mapping canonical state names
//! to [`StateForecast`] records, written next to the processed dataset by
//! the `darpan forecast` command and loaded once at API startup.
//!
//! See [`model`] for the projection itself.

pub mod model;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use darpan_core::{Dataset, StateForecast, StateName};

pub use model::{project_state, LinearTrend, HISTORY_MONTHS, HORIZON};

/// Errors loading or persisting the forecast store.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Filesystem read/write failure.
    #[error("failed to access forecast store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid store document.
    #[error("failed to parse forecast store {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-state forecast records, keyed by canonical state name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastStore {
    states: BTreeMap<StateName, StateForecast>,
}

impl ForecastStore {
    /// Project every state present in the dataset.
    pub fn generate(dataset: &Dataset) -> Self {
        let mut states = BTreeMap::new();
        for state in dataset.states() {
            let Some(rollup) = dataset.state_rollup(state.as_str()) else {
                continue;
            };
            let forecast = project_state(rollup.update_volume, state_seed(state));
            tracing::debug!(
                state = %state,
                accuracy = forecast.accuracy,
                trend = %forecast.trend,
                "projected state volume"
            );
            states.insert(state.clone(), forecast);
        }
        Self { states }
    }

    /// Look up a state's forecast by canonical name.
    pub fn get(&self, state: &str) -> Option<&StateForecast> {
        self.states.get(state)
    }

    /// Iterate records in state order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateName, &StateForecast)> {
        self.states.iter()
    }

    /// Number of states covered.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Persist the store as JSON, atomically (write temp file, rename).
    pub fn save(&self, path: &Path) -> Result<(), ForecastError> {
        let body = serde_json::to_vec_pretty(self).map_err(|source| ForecastError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let io_err = |source| ForecastError::Io {
            path: path.to_path_buf(),
            source,
        };
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)
    }

    /// Load a store written by [`ForecastStore::save`].
    pub fn load(path: &Path) -> Result<Self, ForecastError> {
        let bytes = std::fs::read(path).map_err(|source| ForecastError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ForecastError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Stable per-state seed (FNV-1a over the canonical name), so projections
/// do not change between runs over the same dataset.
fn state_seed(state: &StateName) -> u64 {
    state
        .as_str()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use darpan_core::{DistrictMetrics, DistrictName};

    fn record(state: &str, district: &str, volume: f64) -> DistrictMetrics {
        DistrictMetrics {
            state: StateName::canonical(state).unwrap(),
            district: DistrictName::new(district).unwrap(),
            total_enrolment: 1000.0,
            youth_count: 600.0,
            ratio: 0.6,
            mobile_update_volume: volume,
        }
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            record("KERALA", "ERNAKULAM", 4000.0),
            record("KERALA", "KOLLAM", 6000.0),
            record("GOA", "NORTH GOA", 800.0),
        ])
    }

    #[test]
    fn generate_covers_every_state() {
        let store = ForecastStore::generate(&sample());
        assert_eq!(store.len(), 2);
        assert!(store.get("KERALA").is_some());
        assert!(store.get("GOA").is_some());
        assert!(store.get("BIHAR").is_none());
    }

    #[test]
    fn generate_is_deterministic() {
        let a = ForecastStore::generate(&sample());
        let b = ForecastStore::generate(&sample());
        assert_eq!(a, b);
    }

    #[test]
    fn different_states_use_different_seeds() {
        assert_ne!(
            state_seed(&StateName::canonical("KERALA").unwrap()),
            state_seed(&StateName::canonical("GOA").unwrap())
        );
    }

    #[test]
    fn forecast_scales_with_state_volume() {
        let store = ForecastStore::generate(&sample());
        let kerala = store.get("KERALA").unwrap();
        let goa = store.get("GOA").unwrap();
        // Kerala's summed volume (10000) dwarfs Goa's (800); the
        // projections keep that ordering.
        assert!(kerala.values[0] > goa.values[0]);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("load_forecast.json");
        let store = ForecastStore::generate(&sample());
        store.save(&path).unwrap();
        let loaded = ForecastStore::load(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn load_missing_store_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ForecastStore::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ForecastError::Io { .. }));
    }

    #[test]
    fn load_rejects_malformed_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"[1, 2, 3]").unwrap();
        assert!(matches!(
            ForecastStore::load(&path).unwrap_err(),
            ForecastError::Parse { .. }
        ));
    }

    #[test]
    fn store_serializes_as_plain_state_map() {
        let store = ForecastStore::generate(&sample());
        let json = serde_json::to_value(&store).unwrap();
        assert!(json.is_object());
        assert!(json.get("GOA").is_some());
        assert!(json["GOA"]["values"].is_array());
        assert!(json["GOA"]["accuracy"].is_number());
        assert!(json["GOA"]["trend"].is_string());
    }
}
