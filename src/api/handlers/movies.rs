//! Batch metadata handlers served through the cache-aside reconciler.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::MOVIES_TAG;
use crate::api::dto::{ErrorResponse, MovieDetailsResponse, MovieIdsQuery, ProvidersResponse};
use crate::error::AppResult;
use crate::models::{MovieDetails, WatchProviders};
use crate::state::AppState;
use crate::utils::validate::ValidatedQuery;

pub fn movie_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_providers))
        .routes(routes!(get_movie_details))
}

/// GET /api/providers?ids=1,2,3 - Streaming providers per movie.
///
/// Every requested id is present in the response; ids whose fetch failed map
/// to an empty object.
#[utoipa::path(
    get,
    path = "/providers",
    tag = MOVIES_TAG,
    params(MovieIdsQuery),
    responses(
        (status = 200, description = "Movie id → region → offer type → services", body = BTreeMap<String, WatchProviders>),
        (status = 400, description = "Missing or malformed ids", body = ErrorResponse)
    )
)]
async fn get_providers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MovieIdsQuery>,
) -> AppResult<Json<ProvidersResponse>> {
    let ids = query.movie_ids()?;
    let providers = state.services.movies.providers(&ids).await;
    Ok(Json(providers.into_iter().collect()))
}

/// GET /api/movie-details?ids=1,2,3 - Runtime per movie.
#[utoipa::path(
    get,
    path = "/movie-details",
    tag = MOVIES_TAG,
    params(MovieIdsQuery),
    responses(
        (status = 200, description = "Movie id → {runtime}", body = BTreeMap<String, MovieDetails>),
        (status = 400, description = "Missing or malformed ids", body = ErrorResponse)
    )
)]
async fn get_movie_details(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MovieIdsQuery>,
) -> AppResult<Json<MovieDetailsResponse>> {
    let ids = query.movie_ids()?;
    let details = state.services.movies.details(&ids).await;
    Ok(Json(details.into_iter().collect()))
}
