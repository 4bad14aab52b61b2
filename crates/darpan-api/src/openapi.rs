//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single spec served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the dashboard API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Darpan API — Regional Enrollment Analytics",
        version = "0.3.1",
        description = "Read-only API behind the Darpan dashboard.\n\nProvides:\n- **Region metadata** — the state → district index for region pickers\n- **National heatmap** — per-state saturation classification for the choropleth\n- **Audit reports** — per-region pillar cards (inclusivity, security, efficiency)\n\nAll endpoints are unauthenticated and read-only; data comes from the offline ingest and forecast artifacts.",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:5001", description = "Local development server"),
    ),
    paths(
        crate::routes::metadata::get_metadata,
        crate::routes::heatmap::get_heatmap,
        crate::routes::audit::get_audit,
    ),
    components(schemas(
        crate::routes::metadata::MetadataResponse,
        crate::routes::heatmap::HeatmapResponse,
        crate::routes::heatmap::HeatmapEntry,
        crate::routes::audit::AuditResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "metadata", description = "Region index"),
        (name = "heatmap", description = "National saturation classification"),
        (name = "audit", description = "Per-region audit reports"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

/// GET /openapi.json — the assembled spec.
async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
