//! # darpan-api — Axum API Service for the Darpan Dashboard
//!
//! Read-only HTTP service over the offline ingest and forecast artifacts.
//!
//! ## API Surface
//!
//! | Path                | Module                 | Domain                       |
//! |---------------------|------------------------|------------------------------|
//! | `/api/metadata`     | [`routes::metadata`]   | State → district index       |
//! | `/api/heatmap`      | [`routes::heatmap`]    | Per-state classification     |
//! | `/api/audit`        | [`routes::audit`]      | Per-region audit report      |
//! | `/health/*`         | (this module)          | Liveness / readiness probes  |
//! | `/metrics`          | (this module)          | Prometheus exposition        |
//! | `/openapi.json`     | [`openapi`]            | Spec assembly                |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! Health probes and `/metrics` are mounted outside the metrics middleware
//! so scrapes and probes do not count themselves.

pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Check if metrics are enabled via the `DARPAN_METRICS_ENABLED` env var.
/// Defaults to `true` when the variable is absent or set to anything other
/// than `"false"`.
fn metrics_enabled() -> bool {
    std::env::var("DARPAN_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = metrics_enabled();

    let mut api = Router::new()
        .merge(routes::metadata::router())
        .merge(routes::heatmap::router())
        .merge(routes::audit::router())
        .merge(openapi::router());

    // Only register the metrics middleware when metrics are enabled.
    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Unauthenticated probes; readiness reflects actual data availability.
    let mut unauthenticated = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        unauthenticated = unauthenticated
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(metrics));
    }

    let unauthenticated = unauthenticated.with_state(state);

    Router::new().merge(unauthenticated).merge(api)
}

/// GET /metrics — Prometheus metrics scrape endpoint.
///
/// Updates domain gauges from current `AppState` on each scrape (pull
/// model), then gathers and encodes all metrics.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    {
        let guard = state.dataset();
        match guard.as_ref() {
            Some(dataset) => metrics.set_dataset_coverage(dataset.len(), dataset.states().len()),
            None => metrics.set_dataset_coverage(0, 0),
        }
    }
    {
        let guard = state.forecasts();
        let covered = guard.as_ref().map_or(0, |store| store.len());
        metrics.set_forecast_coverage(covered);
    }

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — ready once the processed dataset is loaded.
///
/// A missing forecast store is degraded but servable (audit reports fall
/// back to flat projections), so it does not fail readiness.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let loaded = state.dataset().as_ref().is_some_and(|d| !d.is_empty());
    if loaded {
        (StatusCode::OK, "ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "dataset not loaded").into_response()
    }
}
