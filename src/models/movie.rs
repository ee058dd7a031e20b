//! Catalog entities as served to clients and stored in the cache.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Catalog movie identifier.
pub type MovieId = i64;

/// One movie as returned by the catalog's watchlist listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<i64>,
}

/// Missing and `null` both decode to `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Watchlist entry enriched with genre names.
///
/// `providers` is always empty here; clients load provider data separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WatchlistItem {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: String,
    pub vote_average: f64,
    pub genre_ids: Vec<i64>,
    pub genres: Vec<String>,
    #[schema(value_type = Object)]
    pub providers: serde_json::Map<String, serde_json::Value>,
}

impl WatchlistItem {
    /// Resolve genre ids against `genres`; unknown ids become `"Unknown"`.
    pub fn from_summary(movie: MovieSummary, genres: &HashMap<i64, String>) -> Self {
        let names = movie
            .genre_ids
            .iter()
            .map(|id| genres.get(id).cloned().unwrap_or_else(|| "Unknown".to_string()))
            .collect();

        Self {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            poster_path: movie.poster_path,
            backdrop_path: movie.backdrop_path,
            release_date: movie.release_date,
            vote_average: movie.vote_average,
            genre_ids: movie.genre_ids,
            genres: names,
            providers: serde_json::Map::new(),
        }
    }
}

/// Region → offer type → services, kept exactly as the catalog returns it.
///
/// The empty map doubles as the placeholder for a failed fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct WatchProviders(pub serde_json::Map<String, serde_json::Value>);

impl WatchProviders {
    /// Names of the subscription (`flatrate`) services offered in `region`.
    pub fn flatrate_names(&self, region: &str) -> Vec<String> {
        self.0
            .get(region)
            .and_then(|offers| offers.get("flatrate"))
            .and_then(|services| services.as_array())
            .map(|services| {
                services
                    .iter()
                    .filter_map(|service| service.get("provider_name")?.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Per-movie details entry. `runtime` is in minutes; `None` is also the placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MovieDetails {
    pub runtime: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}
