//! Service layer for business logic operations.
//!
//! Services sit between the HTTP handlers and the cache/catalog layers. Every
//! service is cheap to clone: shared state lives behind `Arc`.

mod cache_service;
mod debug_service;
mod genre_catalog;
mod movie_service;
pub mod seed;
mod streaming_service;
mod watchlist_service;

pub use cache_service::{CacheService, ClearedNamespace, NamespaceSummary};
pub use debug_service::{ConfigSummary, DebugReport, DebugService, EndpointCheck, EndpointChecks};
pub use genre_catalog::{GenreCatalog, GenreTable};
pub use movie_service::MovieService;
pub use streaming_service::{FALLBACK_SERVICES, ServiceSource, StreamingService, StreamingServices};
pub use watchlist_service::WatchlistService;

use std::sync::Arc;

use crate::cache::{BatchReconciler, CacheStore, Clock, PlaceholderPolicy, TtlPolicy, WatchlistAggregator};
use crate::config::Settings;
use crate::external::{CatalogSource, TmdbClient};

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
#[derive(Clone)]
pub struct Services {
    pub watchlist: WatchlistService,
    pub movies: MovieService,
    pub genres: GenreCatalog,
    pub cache: CacheService,
    pub streaming: StreamingService,
    pub debug: DebugService,
}

impl Services {
    /// Wire every service onto one store, one catalog source and one clock.
    ///
    /// `client` is used only for the raw diagnostics requests; all cached reads
    /// go through `catalog`.
    pub fn new(
        settings: &Settings,
        store: Arc<dyn CacheStore>,
        catalog: Arc<dyn CatalogSource>,
        client: TmdbClient,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let ttl = TtlPolicy::from(&settings.cache);
        let genres = GenreCatalog::new(Arc::clone(&catalog));

        let aggregator = WatchlistAggregator::new(
            Arc::clone(&store),
            Arc::clone(&catalog),
            Arc::clone(&clock),
            ttl.watchlist_hours,
        );
        let reconciler = BatchReconciler::new(
            Arc::clone(&store),
            clock,
            settings.cache.concurrency_width,
        )
        .with_placeholder_policy(PlaceholderPolicy::from(settings.cache.cache_placeholders));

        Self {
            watchlist: WatchlistService::new(
                aggregator,
                genres.clone(),
                settings.tmdb.account_id.clone(),
            ),
            movies: MovieService::new(reconciler, catalog, ttl),
            genres: genres.clone(),
            cache: CacheService::new(Arc::clone(&store), genres, ttl),
            streaming: StreamingService::new(
                store,
                &settings.tmdb.streaming_services,
                settings.tmdb.region.clone(),
            ),
            debug: DebugService::new(client, settings.tmdb.clone()),
        }
    }
}
