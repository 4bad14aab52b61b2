//! # Audit Report API
//!
//! `GET /api/audit?state=<s>&district=<d>` — the per-region report the
//! dashboard renders as cards. With an empty `district`, the report is a
//! state-level weighted analysis; otherwise a district drilldown.
//!
//! ## Forecast Handshake
//!
//! The efficiency card needs the state's volume projection. Three paths,
//! in order of preference:
//!
//! 1. The forecast store has the state → use its projection.
//! 2. Store loaded but the state is absent → flat `volume × 1.1`
//!    projection at the reference accuracy (85.0), STABLE.
//! 3. Store unavailable → flat `volume × 1.05` projection, accuracy 0,
//!    UNKNOWN.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use darpan_core::{analyze, AuditCards, StateForecast, TrendLabel};

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for an audit report.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditQuery {
    /// State or union territory name. Trimmed and uppercased before lookup.
    #[serde(default)]
    pub state: String,
    /// District name. Empty selects the state-level analysis.
    #[serde(default)]
    pub district: String,
}

/// Audit report response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuditResponse {
    /// Always `"success"`.
    pub status: String,
    /// The region the report describes (state or district name).
    pub location: String,
    /// The three pillar cards.
    #[schema(value_type = Object)]
    pub cards: AuditCards,
}

/// Build the audit router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/audit", get(get_audit))
}

/// GET /api/audit — build the report for one region.
#[utoipa::path(
    get,
    path = "/api/audit",
    params(AuditQuery),
    responses(
        (status = 200, description = "Audit report for the region", body = AuditResponse),
        (status = 404, description = "Unknown state or district", body = crate::error::ErrorBody),
        (status = 503, description = "Dataset not loaded", body = crate::error::ErrorBody),
    ),
    tag = "audit"
)]
pub async fn get_audit(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<AuditResponse>, AppError> {
    let target_state = query.state.trim().to_uppercase();
    let target_district = query.district.trim().to_uppercase();

    let guard = state.dataset();
    let dataset = guard
        .as_ref()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::ServiceUnavailable("processed dataset not loaded".into()))?;

    let rollup = dataset
        .state_rollup(&target_state)
        .ok_or_else(|| AppError::NotFound("State not found".into()))?;

    let (ratio, volume, location) = if target_district.is_empty() {
        (
            rollup.weighted_ratio,
            rollup.update_volume,
            target_state.clone(),
        )
    } else {
        let row = dataset
            .district(&target_state, &target_district)
            .ok_or_else(|| AppError::NotFound("District not found".into()))?;
        (row.ratio, row.mobile_update_volume, target_district.clone())
    };

    let intelligence = match state.forecasts().as_ref() {
        Some(store) => store
            .get(&target_state)
            .cloned()
            .unwrap_or_else(|| StateForecast::flat(volume, 1.1, 85.0, TrendLabel::Stable)),
        None => StateForecast::flat(volume, 1.05, 0.0, TrendLabel::Unknown),
    };

    let cards = analyze(volume, ratio, &intelligence);
    Ok(Json(AuditResponse {
        status: "success".to_string(),
        location,
        cards,
    }))
}
