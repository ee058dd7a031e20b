//! Paged watchlist collection cached as one snapshot per account.

use std::future::Future;
use std::sync::Arc;

use crate::cache::{CacheStore, Clock, Namespace, is_fresh};
use crate::external::{CatalogSource, Page, UpstreamError};
use crate::models::MovieSummary;

/// The catalog refuses pages beyond this.
const MAX_PAGES: u32 = 500;

/// Fetch pages 1, 2, ... strictly one after another until the reported
/// `total_pages` is reached, concatenating results in page order.
///
/// The first failing page aborts the whole collection.
pub async fn aggregate_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, UpstreamError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, UpstreamError>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let current = fetch_page(page).await?;
        tracing::debug!(page, found = current.results.len(), total_pages = current.total_pages, "Fetched page");
        items.extend(current.results);

        if page >= current.total_pages {
            break;
        }
        if page >= MAX_PAGES {
            tracing::warn!(total_pages = current.total_pages, "Stopping at the catalog page limit");
            break;
        }
        page += 1;
    }

    Ok(items)
}

/// Serves an account's watchlist from the cache, re-collecting it from the
/// catalog once the snapshot is older than the watchlist TTL.
#[derive(Clone)]
pub struct WatchlistAggregator {
    store: Arc<dyn CacheStore>,
    catalog: Arc<dyn CatalogSource>,
    clock: Arc<dyn Clock>,
    ttl_hours: u32,
}

impl WatchlistAggregator {
    pub fn new(
        store: Arc<dyn CacheStore>,
        catalog: Arc<dyn CatalogSource>,
        clock: Arc<dyn Clock>,
        ttl_hours: u32,
    ) -> Self {
        Self {
            store,
            catalog,
            clock,
            ttl_hours,
        }
    }

    /// The account's full watchlist in catalog order.
    ///
    /// A failed collection yields an empty list and leaves any previous
    /// snapshot in place.
    pub async fn watchlist(&self, account_id: &str) -> Vec<MovieSummary> {
        if let Some(movies) = self.cached(account_id).await {
            tracing::info!(account_id, count = movies.len(), "Watchlist served from cache");
            return movies;
        }

        tracing::info!(account_id, "Fetching watchlist from catalog");
        let catalog = Arc::clone(&self.catalog);
        let collected =
            aggregate_pages(|page| {
                let catalog = Arc::clone(&catalog);
                async move { catalog.watchlist_page(account_id, page).await }
            })
            .await;

        let movies = match collected {
            Ok(movies) => movies,
            Err(e) => {
                tracing::error!(account_id, error = %e, "Watchlist collection failed");
                return Vec::new();
            }
        };

        tracing::info!(account_id, count = movies.len(), "Watchlist collected");
        self.store_snapshot(account_id, &movies).await;
        movies
    }

    async fn cached(&self, account_id: &str) -> Option<Vec<MovieSummary>> {
        let now = self.clock.now();
        let mut records = match self
            .store
            .get_many(Namespace::Watchlist, &[account_id.to_string()])
            .await
        {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(account_id, error = %e, "Watchlist cache read failed");
                return None;
            }
        };

        let record = records.remove(account_id)?;
        if !is_fresh(record.cached_at, self.ttl_hours, now) {
            return None;
        }

        match serde_json::from_value(record.payload) {
            Ok(movies) => Some(movies),
            Err(e) => {
                tracing::warn!(account_id, error = %e, "Cached watchlist has unexpected shape");
                None
            }
        }
    }

    async fn store_snapshot(&self, account_id: &str, movies: &[MovieSummary]) {
        let payload = match serde_json::to_value(movies) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(account_id, error = %e, "Watchlist not cached");
                return;
            }
        };

        if let Err(e) = self
            .store
            .put_one(Namespace::Watchlist, account_id, payload, self.clock.now())
            .await
        {
            tracing::warn!(account_id, error = %e, "Watchlist cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemoryCacheStore};
    use crate::external::tmdb::fake::{ScriptedCatalog, movie};
    use chrono::{Duration, TimeZone, Utc};

    fn five_movies() -> Vec<Vec<MovieSummary>> {
        vec![
            vec![movie(1, "Heat", &[80]), movie(2, "Ronin", &[28])],
            vec![movie(3, "Alien", &[27]), movie(4, "Aliens", &[28])],
            vec![movie(5, "Brazil", &[35])],
        ]
    }

    fn aggregator(
        catalog: Arc<ScriptedCatalog>,
    ) -> (WatchlistAggregator, Arc<MemoryCacheStore>, Arc<ManualClock>) {
        let store = Arc::new(MemoryCacheStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap(),
        ));
        let aggregator = WatchlistAggregator::new(store.clone(), catalog, clock.clone(), 6);
        (aggregator, store, clock)
    }

    #[tokio::test]
    async fn test_collects_all_pages_in_order() {
        let catalog = Arc::new(ScriptedCatalog::with_pages(five_movies()));
        let (aggregator, store, _) = aggregator(catalog.clone());

        let movies = aggregator.watchlist("acct").await;

        let ids: Vec<i64> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(catalog.pages_requested(), vec![1, 2, 3]);

        let stats = store.count_and_latest(Namespace::Watchlist).await.unwrap();
        assert_eq!(stats.count, 1);
    }

    #[tokio::test]
    async fn test_fresh_snapshot_skips_catalog() {
        let catalog = Arc::new(ScriptedCatalog::with_pages(five_movies()));
        let (aggregator, _, clock) = aggregator(catalog.clone());

        let first = aggregator.watchlist("acct").await;
        clock.advance(Duration::hours(5));
        let second = aggregator.watchlist("acct").await;

        assert_eq!(first, second);
        assert_eq!(catalog.pages_requested().len(), 3);

        clock.advance(Duration::hours(1));
        aggregator.watchlist("acct").await;
        assert_eq!(catalog.pages_requested().len(), 6);
    }

    #[tokio::test]
    async fn test_page_failure_returns_empty_and_caches_nothing() {
        let catalog = Arc::new(ScriptedCatalog {
            failing_page: Some(2),
            ..ScriptedCatalog::with_pages(five_movies())
        });
        let (aggregator, store, _) = aggregator(catalog.clone());

        let movies = aggregator.watchlist("acct").await;

        assert!(movies.is_empty());
        assert_eq!(catalog.pages_requested(), vec![1, 2]);
        let stats = store.count_and_latest(Namespace::Watchlist).await.unwrap();
        assert_eq!(stats.count, 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let catalog = Arc::new(ScriptedCatalog::with_pages(five_movies()));
        let (aggregator, store, clock) = aggregator(catalog);
        aggregator.watchlist("acct").await;

        clock.advance(Duration::hours(7));
        let broken = Arc::new(ScriptedCatalog {
            failing_page: Some(1),
            ..Default::default()
        });
        let stale_reader = WatchlistAggregator::new(store.clone(), broken, clock, 6);

        assert!(stale_reader.watchlist("acct").await.is_empty());
        let stats = store.count_and_latest(Namespace::Watchlist).await.unwrap();
        assert_eq!(stats.count, 1);
    }

    #[tokio::test]
    async fn test_empty_watchlist_is_cached() {
        let catalog = Arc::new(ScriptedCatalog::with_pages(vec![vec![]]));
        let (aggregator, store, _) = aggregator(catalog.clone());

        assert!(aggregator.watchlist("acct").await.is_empty());
        assert!(aggregator.watchlist("acct").await.is_empty());
        assert_eq!(catalog.pages_requested(), vec![1]);
        let stats = store.count_and_latest(Namespace::Watchlist).await.unwrap();
        assert_eq!(stats.count, 1);
    }

    #[tokio::test]
    async fn test_aggregate_pages_stops_at_reported_total() {
        let mut requested = Vec::new();
        let items = aggregate_pages(|page| {
            requested.push(page);
            async move {
                Ok(Page {
                    page,
                    results: vec![page; 2],
                    total_pages: 2,
                    total_results: 4,
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 1, 2, 2]);
        assert_eq!(requested, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_aggregate_pages_zero_total_reads_one_page() {
        let items: Vec<u32> = aggregate_pages(|page| async move {
            Ok(Page {
                page,
                results: vec![],
                total_pages: 0,
                total_results: 0,
            })
        })
        .await
        .unwrap();
        assert!(items.is_empty());
    }
}
