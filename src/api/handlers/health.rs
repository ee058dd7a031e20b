//! Health endpoints.
//!
//! Liveness never touches dependencies. Readiness round-trips to the cache
//! store only; a missing catalog credential degrades `/health` but keeps the
//! instance ready, since cached data and diagnostics still work.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Component report: cache store reachability and catalog credentials.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Healthy or degraded", body = HealthResponse),
        (status = 503, description = "Cache store unreachable", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let checks = BTreeMap::from([
        ("cache_store".to_string(), cache_store_health(&state).await),
        ("catalog".to_string(), catalog_health(&state)),
    ]);
    let response = HealthResponse::from_checks(checks);

    let code = match response.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };
    (code, Json(response))
}

#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Cache store reachable"),
        (status = 503, description = "Cache store unreachable")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match cache_store_health(&state).await.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    }
}

#[utoipa::path(
    get,
    path = "/health/live",
    responses((status = 200, description = "Process is running")),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn cache_store_health(state: &AppState) -> ComponentHealth {
    let cache = &state.services.cache;
    let started = Instant::now();
    let outcome = cache.ping().await;
    let response_time_ms = Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX));

    match outcome {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: format!("{} reachable", cache.backend()),
            response_time_ms,
        },
        Err(e) => {
            tracing::warn!(backend = cache.backend(), error = %e, "Cache store health check failed");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: format!("{} unreachable: {}", cache.backend(), e),
                response_time_ms,
            }
        }
    }
}

/// Configuration only; `/api/debug` makes the live catalog calls.
fn catalog_health(state: &AppState) -> ComponentHealth {
    let summary = state.services.debug.config_summary();
    let (status, message) = match (summary.tmdb_api_key_set, summary.tmdb_account_id_set) {
        (true, true) => (HealthStatus::Healthy, "credentials configured"),
        (false, _) => (HealthStatus::Degraded, "API key not configured"),
        (true, false) => (HealthStatus::Degraded, "account id not configured"),
    };
    ComponentHealth {
        status,
        message: message.to_string(),
        response_time_ms: None,
    }
}
