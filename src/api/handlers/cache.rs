//! Cache administration handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CACHE_TAG;
use crate::api::dto::{CacheStatsResponse, ClearCacheResponse, ErrorResponse};
use crate::error::AppResult;
use crate::state::AppState;

pub fn cache_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(cache_stats))
        .routes(routes!(clear_cache, clear_cache_via_get))
}

/// GET /api/cache/stats - Record count, latest write and TTL per namespace.
#[utoipa::path(
    get,
    path = "/stats",
    tag = CACHE_TAG,
    responses(
        (status = 200, description = "Per-namespace statistics", body = CacheStatsResponse),
        (status = 500, description = "Cache store unavailable", body = ErrorResponse)
    )
)]
async fn cache_stats(State(state): State<AppState>) -> AppResult<Json<CacheStatsResponse>> {
    let cache = &state.services.cache;
    let summaries = cache.stats().await?;
    Ok(Json(CacheStatsResponse::new(cache.backend(), summaries)))
}

/// POST /api/cache/clear - Remove every cached record and reload genres on next use.
#[utoipa::path(
    post,
    path = "/clear",
    tag = CACHE_TAG,
    responses(
        (status = 200, description = "Cache cleared", body = ClearCacheResponse),
        (status = 500, description = "Cache store unavailable", body = ErrorResponse)
    )
)]
async fn clear_cache(State(state): State<AppState>) -> AppResult<Json<ClearCacheResponse>> {
    let cleared = state.services.cache.clear().await?;
    Ok(Json(cleared.into()))
}

/// GET /api/cache/clear - Same as the POST form, kept for browser bookmarks.
#[utoipa::path(
    get,
    path = "/clear",
    tag = CACHE_TAG,
    responses(
        (status = 200, description = "Cache cleared", body = ClearCacheResponse),
        (status = 500, description = "Cache store unavailable", body = ErrorResponse)
    )
)]
async fn clear_cache_via_get(state: State<AppState>) -> AppResult<Json<ClearCacheResponse>> {
    clear_cache(state).await
}
