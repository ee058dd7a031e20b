//! TMDb v3 catalog integration.

mod client;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub use client::TmdbClient;
pub use types::Page;

use async_trait::async_trait;

use crate::external::UpstreamError;
use crate::models::{Genre, MovieDetails, MovieId, MovieSummary, WatchProviders};

/// The catalog operations the service depends on.
///
/// [`TmdbClient`] is the production implementation; tests substitute scripted
/// sources.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// One page (1-based) of the account's movie watchlist.
    async fn watchlist_page(
        &self,
        account_id: &str,
        page: u32,
    ) -> Result<Page<MovieSummary>, UpstreamError>;

    /// Region → offer type → services for one movie.
    async fn watch_providers(&self, movie_id: MovieId) -> Result<WatchProviders, UpstreamError>;

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails, UpstreamError>;

    /// The full movie genre table.
    async fn genres(&self) -> Result<Vec<Genre>, UpstreamError>;
}
