use crate::cache::WatchlistAggregator;
use crate::models::WatchlistItem;
use crate::services::GenreCatalog;

/// Serves the configured account's watchlist with genre names resolved.
#[derive(Clone)]
pub struct WatchlistService {
    aggregator: WatchlistAggregator,
    genres: GenreCatalog,
    account_id: String,
}

impl WatchlistService {
    pub fn new(aggregator: WatchlistAggregator, genres: GenreCatalog, account_id: String) -> Self {
        Self {
            aggregator,
            genres,
            account_id,
        }
    }

    /// Watchlist entries in catalog order. Provider data is not included.
    pub async fn watchlist(&self) -> Vec<WatchlistItem> {
        if self.account_id.is_empty() {
            tracing::warn!("No catalog account configured, watchlist will be empty");
        }

        let movies = self.aggregator.watchlist(&self.account_id).await;
        let table = self.genres.get().await;

        movies
            .into_iter()
            .map(|movie| WatchlistItem::from_summary(movie, &table.names))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemoryCacheStore};
    use crate::external::tmdb::fake::{ScriptedCatalog, movie};
    use crate::models::Genre;
    use chrono::Utc;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_watchlist_resolves_genres_and_leaves_providers_empty() {
        let catalog = Arc::new(ScriptedCatalog {
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
            ..ScriptedCatalog::with_pages(vec![vec![
                movie(278, "The Shawshank Redemption", &[18, 80]),
                movie(389, "12 Angry Men", &[18]),
            ]])
        });
        let aggregator = WatchlistAggregator::new(
            Arc::new(MemoryCacheStore::new()),
            catalog.clone(),
            Arc::new(ManualClock::new(Utc::now())),
            6,
        );
        let service = WatchlistService::new(aggregator, GenreCatalog::new(catalog), "acct".to_string());

        let items = service.watchlist().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].genres, vec!["Drama", "Unknown"]);
        assert!(items.iter().all(|item| item.providers.is_empty()));
    }
}
