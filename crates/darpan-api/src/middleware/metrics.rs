//! # Prometheus Metrics
//!
//! Metrics exporter backed by a dedicated `prometheus` registry.
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Domain-level gauges (dataset coverage, forecast coverage)
//! are updated on each `/metrics` scrape (pull model) — see the metrics
//! handler in `lib.rs`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;
use prometheus::{Encoder, Gauge, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    // -- HTTP middleware metrics (push model) --
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    // -- Domain gauges (pull model, updated on /metrics scrape) --
    dataset_districts: Gauge,
    dataset_states: Gauge,
    forecast_states: Gauge,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics").finish_non_exhaustive()
    }
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("darpan_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "darpan_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new("darpan_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let dataset_districts = Gauge::new(
            "darpan_dataset_districts",
            "District records in the loaded dataset (0 when not loaded)",
        )
        .expect("metric can be created");

        let dataset_states = Gauge::new(
            "darpan_dataset_states",
            "Distinct states in the loaded dataset",
        )
        .expect("metric can be created");

        let forecast_states = Gauge::new(
            "darpan_forecast_states",
            "States covered by the loaded forecast store",
        )
        .expect("metric can be created");

        for collector in [
            Box::new(http_requests_total.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(http_request_duration_seconds.clone()),
            Box::new(http_errors_total.clone()),
            Box::new(dataset_districts.clone()),
            Box::new(dataset_states.clone()),
            Box::new(forecast_states.clone()),
        ] {
            registry
                .register(collector)
                .expect("metric registers once");
        }

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                dataset_districts,
                dataset_states,
                forecast_states,
            }),
        }
    }

    /// Record one completed request.
    pub fn observe_request(&self, method: &str, path: &str, status: u16, seconds: f64) {
        let status_label = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_label])
            .inc();
        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(seconds);
        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_label])
                .inc();
        }
    }

    /// Update the dataset coverage gauges.
    pub fn set_dataset_coverage(&self, districts: usize, states: usize) {
        self.inner.dataset_districts.set(districts as f64);
        self.inner.dataset_states.set(states as f64);
    }

    /// Update the forecast coverage gauge.
    pub fn set_forecast_coverage(&self, states: usize) {
        self.inner.forecast_states.set(states as f64);
    }

    /// Gather and encode all metrics in Prometheus text exposition format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buffer)
            .map_err(|e| e.to_string())?;
        String::from_utf8(buffer).map_err(|e| e.to_string())
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Axum middleware recording per-request metrics.
pub async fn metrics_middleware(
    Extension(metrics): Extension<ApiMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    metrics.observe_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
