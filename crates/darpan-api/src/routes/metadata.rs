//! # Region Metadata API
//!
//! `GET /api/metadata` — the state → district index the dashboard uses to
//! populate its region pickers. States are sorted; district lists are
//! sorted and de-duplicated.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Region index response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetadataResponse {
    /// Always `"success"`.
    pub status: String,
    /// Sorted state → sorted unique district names.
    pub metadata: BTreeMap<String, Vec<String>>,
}

/// Build the metadata router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/metadata", get(get_metadata))
}

/// GET /api/metadata — list every state with its districts.
#[utoipa::path(
    get,
    path = "/api/metadata",
    responses(
        (status = 200, description = "State and district index", body = MetadataResponse),
        (status = 503, description = "Dataset not loaded", body = crate::error::ErrorBody),
    ),
    tag = "metadata"
)]
pub async fn get_metadata(
    State(state): State<AppState>,
) -> Result<Json<MetadataResponse>, AppError> {
    let guard = state.dataset();
    let dataset = guard
        .as_ref()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::ServiceUnavailable("processed dataset not loaded".into()))?;

    Ok(Json(MetadataResponse {
        status: "success".to_string(),
        metadata: dataset.region_index(),
    }))
}
