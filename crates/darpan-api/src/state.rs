//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The service owns two read-mostly artifacts, both produced offline:
//! the processed dataset (ingest pipeline) and the forecast store
//! (forecaster). Either may be absent — the service then answers 503 on
//! data routes (missing dataset) or falls back to flat projections
//! (missing store) instead of refusing to start.
//!
//! Locks are `parking_lot::RwLock` and are never held across `.await`
//! points; every handler reads synchronously.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use darpan_core::Dataset;
use darpan_forecast::ForecastStore;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Path of the processed metrics document.
    pub data_path: PathBuf,
    /// Path of the forecast store document.
    pub forecast_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            data_path: PathBuf::from("data/processed_metrics.json"),
            forecast_path: PathBuf::from("data/load_forecast.json"),
        }
    }
}

impl AppConfig {
    /// Build configuration from `DARPAN_PORT`, `DARPAN_DATA_PATH`, and
    /// `DARPAN_FORECAST_PATH`, falling back to defaults for unset or
    /// unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = match std::env::var("DARPAN_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "DARPAN_PORT is not a valid port; using default");
                defaults.port
            }),
            Err(_) => defaults.port,
        };
        let path_var = |name: &str, default: PathBuf| {
            std::env::var(name).map(PathBuf::from).unwrap_or(default)
        };
        Self {
            port,
            data_path: path_var("DARPAN_DATA_PATH", defaults.data_path),
            forecast_path: path_var("DARPAN_FORECAST_PATH", defaults.forecast_path),
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly via `Arc` internals.
#[derive(Debug, Clone)]
pub struct AppState {
    dataset: Arc<RwLock<Option<Dataset>>>,
    forecasts: Arc<RwLock<Option<ForecastStore>>>,
    pub config: AppConfig,
}

impl AppState {
    /// Empty state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Empty state with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(None)),
            forecasts: Arc::new(RwLock::new(None)),
            config,
        }
    }

    /// State pre-populated with artifacts, bypassing the filesystem.
    pub fn with_data(dataset: Dataset, forecasts: Option<ForecastStore>) -> Self {
        let state = Self::new();
        state.set_dataset(Some(dataset));
        state.set_forecasts(forecasts);
        state
    }

    /// Load both artifacts from the configured paths.
    ///
    /// A missing or unreadable dataset leaves the service in "no data"
    /// mode (data routes answer 503); a missing forecast store leaves
    /// audit reports on their flat fallback projections. Neither is fatal.
    pub fn hydrate(&self) {
        match Dataset::load(&self.config.data_path) {
            Ok(dataset) => {
                tracing::info!(
                    districts = dataset.len(),
                    states = dataset.states().len(),
                    path = %self.config.data_path.display(),
                    "loaded processed dataset"
                );
                self.set_dataset(Some(dataset));
            }
            Err(e) => {
                tracing::warn!(error = %e, "dataset unavailable; data routes will answer 503");
                self.set_dataset(None);
            }
        }

        match ForecastStore::load(&self.config.forecast_path) {
            Ok(store) => {
                tracing::info!(
                    states = store.len(),
                    path = %self.config.forecast_path.display(),
                    "loaded forecast store"
                );
                self.set_forecasts(Some(store));
            }
            Err(e) => {
                tracing::warn!(error = %e, "forecast store unavailable; audit reports will use fallback projections");
                self.set_forecasts(None);
            }
        }
    }

    /// Read access to the dataset slot.
    pub fn dataset(&self) -> RwLockReadGuard<'_, Option<Dataset>> {
        self.dataset.read()
    }

    /// Read access to the forecast store slot.
    pub fn forecasts(&self) -> RwLockReadGuard<'_, Option<ForecastStore>> {
        self.forecasts.read()
    }

    /// Replace the dataset slot.
    pub fn set_dataset(&self, dataset: Option<Dataset>) {
        *self.dataset.write() = dataset;
    }

    /// Replace the forecast store slot.
    pub fn set_forecasts(&self, forecasts: Option<ForecastStore>) {
        *self.forecasts.write() = forecasts;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
