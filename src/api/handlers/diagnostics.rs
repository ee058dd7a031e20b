//! Streaming service discovery and catalog diagnostics.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::{DIAGNOSTICS_TAG, WATCHLIST_TAG};
use crate::api::dto::StreamingServicesResponse;
use crate::services::DebugReport;
use crate::state::AppState;

pub fn diagnostics_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(streaming_services))
        .routes(routes!(debug_report))
}

/// GET /api/streaming-services - Preferred services plus those seen in cached provider data.
#[utoipa::path(
    get,
    path = "/streaming-services",
    tag = WATCHLIST_TAG,
    responses(
        (status = 200, description = "Service names for the configured region", body = StreamingServicesResponse)
    )
)]
async fn streaming_services(State(state): State<AppState>) -> Json<StreamingServicesResponse> {
    Json(state.services.streaming.services().await.into())
}

/// GET /api/debug - Configuration summary and live catalog checks.
///
/// The credential is reported only as present/absent and its length.
#[utoipa::path(
    get,
    path = "/debug",
    tag = DIAGNOSTICS_TAG,
    responses(
        (status = 200, description = "Configuration and check results", body = DebugReport)
    )
)]
async fn debug_report(State(state): State<AppState>) -> Json<DebugReport> {
    Json(state.services.debug.report().await)
}
