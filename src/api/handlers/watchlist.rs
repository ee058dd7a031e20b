//! Watchlist and genre handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::WATCHLIST_TAG;
use crate::models::{Genre, WatchlistItem};
use crate::state::AppState;

pub fn watchlist_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_watchlist))
        .routes(routes!(list_genres))
}

/// GET /api/watchlist - The account's watchlist with genre names.
///
/// Provider data is always empty here; clients fetch it from `/api/providers`.
/// A catalog failure yields an empty list rather than an error.
#[utoipa::path(
    get,
    path = "/watchlist",
    tag = WATCHLIST_TAG,
    responses(
        (status = 200, description = "Watchlist in catalog order", body = Vec<WatchlistItem>)
    )
)]
async fn get_watchlist(State(state): State<AppState>) -> Json<Vec<WatchlistItem>> {
    Json(state.services.watchlist.watchlist().await)
}

/// GET /api/genres - The catalog's movie genres.
#[utoipa::path(
    get,
    path = "/genres",
    tag = WATCHLIST_TAG,
    responses(
        (status = 200, description = "Genre list, empty if the catalog is unreachable", body = Vec<Genre>)
    )
)]
async fn list_genres(State(state): State<AppState>) -> Json<Vec<Genre>> {
    let table = state.services.genres.get().await;
    Json(table.genres.clone())
}
