//! # Dashboard API Client
//!
//! Wraps a `reqwest::Client` with the service base URL and a client-wide
//! timeout, and maps transport, status, and decode failures into
//! [`ClientError`] with the endpoint in context.
//!
//! The service reports request-level failures both ways the original
//! deployment did: a non-2xx status with an error envelope, and (from
//! older builds) a 200 carrying `{"status":"error"}`. Both surface as
//! [`ClientError::Api`].

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use darpan_core::AuditCards;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::{AuditReport, HeatmapCell, HeatmapReport, RegionIndex};

// -- Wire envelopes -----------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MetadataWire {
    status: String,
    #[serde(default)]
    metadata: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HeatmapWire {
    status: String,
    #[serde(default)]
    data: BTreeMap<String, HeatmapCell>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuditWire {
    status: String,
    #[serde(default)]
    location: String,
    cards: Option<AuditCards>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWire {
    #[serde(default)]
    message: String,
}

// -- Client -------------------------------------------------------------------

/// Typed client for the dashboard API.
#[derive(Debug, Clone)]
pub struct DarpanClient {
    http: reqwest::Client,
    base_url: String,
}

impl DarpanClient {
    /// Build a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.normalized_base_url()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ClientError::Http {
                endpoint: base_url.clone(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    /// Fetch the state → district index.
    pub async fn fetch_metadata(&self) -> Result<RegionIndex, ClientError> {
        let wire: MetadataWire = self.get_json("/api/metadata", &[]).await?;
        self.check_envelope("/api/metadata", &wire.status, wire.message)?;
        Ok(RegionIndex::new(wire.metadata))
    }

    /// Fetch the per-state heatmap classification.
    pub async fn fetch_heatmap(&self) -> Result<HeatmapReport, ClientError> {
        let wire: HeatmapWire = self.get_json("/api/heatmap", &[]).await?;
        self.check_envelope("/api/heatmap", &wire.status, wire.message)?;
        Ok(HeatmapReport::new(wire.data))
    }

    /// Fetch the audit report for a region. An absent `district` selects
    /// the state-level analysis.
    pub async fn fetch_audit(
        &self,
        state: &str,
        district: Option<&str>,
    ) -> Result<AuditReport, ClientError> {
        let query = [("state", state), ("district", district.unwrap_or(""))];
        let wire: AuditWire = self.get_json("/api/audit", &query).await?;
        self.check_envelope("/api/audit", &wire.status, wire.message)?;
        let cards = wire.cards.ok_or_else(|| ClientError::Api {
            endpoint: self.endpoint("/api/audit"),
            status: 200,
            message: "success envelope without cards".to_string(),
        })?;
        Ok(AuditReport {
            location: wire.location,
            cards,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reject 200-with-error envelopes from older service builds.
    fn check_envelope(
        &self,
        path: &str,
        status: &str,
        message: Option<String>,
    ) -> Result<(), ClientError> {
        if status == "success" {
            return Ok(());
        }
        Err(ClientError::Api {
            endpoint: self.endpoint(path),
            status: 200,
            message: message.unwrap_or_else(|| "service reported failure".to_string()),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let endpoint = self.endpoint(path);
        tracing::debug!(%endpoint, "fetching dashboard payload");

        let response = self
            .http
            .get(&endpoint)
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorWire>(&bytes)
                .map(|e| e.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
            return Err(ClientError::Api {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| ClientError::Deserialization {
            endpoint,
            source,
        })
    }
}
