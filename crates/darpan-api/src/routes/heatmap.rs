//! # National Heatmap API
//!
//! `GET /api/heatmap` — per-state saturation classification, the data
//! behind the choropleth of India. Each state carries its
//! enrollment-weighted youth ratio (rounded to 2 places) and the
//! saturation status classified from the unrounded value.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use darpan_core::{round_to, saturation_status, PillarStatus};

use crate::error::AppError;
use crate::state::AppState;

/// One state's heatmap classification.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HeatmapEntry {
    /// Enrollment-weighted youth ratio, rounded to 2 places.
    pub ratio: f64,
    /// Saturation status classified from the unrounded ratio.
    #[schema(value_type = String)]
    pub status: PillarStatus,
}

/// Heatmap response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HeatmapResponse {
    /// Always `"success"`.
    pub status: String,
    /// State → classification, in state order.
    pub data: BTreeMap<String, HeatmapEntry>,
}

/// Build the heatmap router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/heatmap", get(get_heatmap))
}

/// GET /api/heatmap — classify every state.
#[utoipa::path(
    get,
    path = "/api/heatmap",
    responses(
        (status = 200, description = "Per-state saturation classification", body = HeatmapResponse),
        (status = 503, description = "Dataset not loaded", body = crate::error::ErrorBody),
    ),
    tag = "heatmap"
)]
pub async fn get_heatmap(State(state): State<AppState>) -> Result<Json<HeatmapResponse>, AppError> {
    let guard = state.dataset();
    let dataset = guard
        .as_ref()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::ServiceUnavailable("processed dataset not loaded".into()))?;

    let data = dataset
        .state_rollups()
        .into_iter()
        .map(|(state_name, rollup)| {
            let entry = HeatmapEntry {
                ratio: round_to(rollup.weighted_ratio, 2),
                status: saturation_status(rollup.weighted_ratio),
            };
            (state_name, entry)
        })
        .collect();

    Ok(Json(HeatmapResponse {
        status: "success".to_string(),
        data,
    }))
}
