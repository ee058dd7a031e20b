//! Cache-aside reconciliation of a batch of movie ids.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;

use crate::cache::{CacheStore, Clock, Namespace, is_fresh};
use crate::external::UpstreamError;
use crate::models::MovieId;

/// Whether placeholders for failed fetches are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderPolicy {
    /// Write the placeholder like any fetched value; the id is retried after the TTL.
    #[default]
    Cache,
    /// Serve the placeholder but leave the store untouched; the id is retried next call.
    Skip,
}

impl From<bool> for PlaceholderPolicy {
    fn from(cache_placeholders: bool) -> Self {
        if cache_placeholders {
            PlaceholderPolicy::Cache
        } else {
            PlaceholderPolicy::Skip
        }
    }
}

/// Merges fresh cache hits with concurrently fetched misses.
///
/// Each `reconcile` call owns its own worker bound; nothing outlives the call.
#[derive(Clone)]
pub struct BatchReconciler {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    concurrency_width: usize,
    placeholders: PlaceholderPolicy,
}

impl BatchReconciler {
    pub fn new(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>, concurrency_width: usize) -> Self {
        Self {
            store,
            clock,
            concurrency_width: concurrency_width.max(1),
            placeholders: PlaceholderPolicy::default(),
        }
    }

    pub fn with_placeholder_policy(mut self, placeholders: PlaceholderPolicy) -> Self {
        self.placeholders = placeholders;
        self
    }

    pub fn concurrency_width(&self) -> usize {
        self.concurrency_width
    }

    /// Return exactly one value per distinct id in `ids`.
    ///
    /// Fresh records are served from the store. The rest are fetched with at
    /// most `concurrency_width` calls in flight; an id whose fetch fails or
    /// panics gets `T::default()`. Fetched values are written back in one
    /// batch stamped with the `now` sampled at the start of the call.
    ///
    /// Store failures never fail the call: a read error counts as a full miss
    /// and a write error is logged.
    pub async fn reconcile<T, F, Fut>(
        &self,
        namespace: Namespace,
        ttl_hours: u32,
        ids: &[MovieId],
        fetch_one: F,
    ) -> HashMap<MovieId, T>
    where
        T: Serialize + DeserializeOwned + Default + Send + 'static,
        F: Fn(MovieId) -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>> + Send + 'static,
    {
        let now = self.clock.now();
        let ids = dedup(ids);
        let keys: Vec<String> = ids.iter().map(|id| id.to_string()).collect();

        let records = match self.store.get_many(namespace, &keys).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    namespace = %namespace,
                    error = %e,
                    "Cache read failed, treating batch as misses"
                );
                HashMap::new()
            }
        };

        let mut result: HashMap<MovieId, T> = HashMap::with_capacity(ids.len());
        for (key, record) in records {
            if !is_fresh(record.cached_at, ttl_hours, now) {
                continue;
            }
            let Ok(id) = key.parse::<MovieId>() else {
                continue;
            };
            match serde_json::from_value::<T>(record.payload) {
                Ok(value) => {
                    result.insert(id, value);
                }
                Err(e) => {
                    tracing::warn!(namespace = %namespace, movie_id = id, error = %e, "Cached payload has unexpected shape");
                }
            }
        }

        let missing: Vec<MovieId> = ids
            .iter()
            .copied()
            .filter(|id| !result.contains_key(id))
            .collect();

        if missing.is_empty() {
            tracing::debug!(namespace = %namespace, hits = result.len(), "All entries served from cache");
            return result;
        }

        tracing::info!(
            namespace = %namespace,
            hits = result.len(),
            misses = missing.len(),
            "Fetching cache misses from upstream"
        );

        let (fetched, failed) = self.fetch_missing(namespace, &missing, fetch_one).await;
        self.write_back(namespace, &fetched, &failed, now).await;

        result.extend(fetched);
        result
    }

    async fn fetch_missing<T, F, Fut>(
        &self,
        namespace: Namespace,
        missing: &[MovieId],
        fetch_one: F,
    ) -> (HashMap<MovieId, T>, HashSet<MovieId>)
    where
        T: Default + Send + 'static,
        F: Fn(MovieId) -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>> + Send + 'static,
    {
        let permits = Arc::new(Semaphore::new(self.concurrency_width));
        let mut tasks = JoinSet::new();

        for &id in missing {
            let fetch = fetch_one(id);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = acquire_permit(permits, id).await;
                (id, fetch.await)
            });
        }

        let mut fetched = HashMap::with_capacity(missing.len());
        let mut failed = HashSet::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(value))) => {
                    fetched.insert(id, value);
                }
                Ok((id, Err(e))) => {
                    tracing::warn!(namespace = %namespace, movie_id = id, error = %e, "Upstream fetch failed, using placeholder");
                    failed.insert(id);
                    fetched.insert(id, T::default());
                }
                Err(e) => {
                    tracing::error!(namespace = %namespace, error = %e, "Fetch task aborted");
                }
            }
        }

        // Ids whose task panicked never reported back.
        for &id in missing {
            if !fetched.contains_key(&id) {
                failed.insert(id);
                fetched.insert(id, T::default());
            }
        }

        (fetched, failed)
    }

    async fn write_back<T: Serialize>(
        &self,
        namespace: Namespace,
        fetched: &HashMap<MovieId, T>,
        failed: &HashSet<MovieId>,
        now: chrono::DateTime<chrono::Utc>,
    ) {
        let entries: HashMap<String, Value> = fetched
            .iter()
            .filter(|(id, _)| self.placeholders == PlaceholderPolicy::Cache || !failed.contains(id))
            .filter_map(|(id, value)| match serde_json::to_value(value) {
                Ok(payload) => Some((id.to_string(), payload)),
                Err(e) => {
                    tracing::warn!(namespace = %namespace, movie_id = id, error = %e, "Skipping unserializable value");
                    None
                }
            })
            .collect();

        if entries.is_empty() {
            return;
        }

        let count = entries.len();
        if let Err(e) = self.store.put_many(namespace, entries, now).await {
            tracing::warn!(namespace = %namespace, count, error = %e, "Cache write failed");
        }
    }
}

/// Wait for a worker slot. A closed semaphore is logged and the fetch runs unbounded.
async fn acquire_permit(permits: Arc<Semaphore>, id: MovieId) -> Option<OwnedSemaphorePermit> {
    match permits.acquire_owned().await {
        Ok(permit) => Some(permit),
        Err(e) => {
            tracing::error!(movie_id = id, error = %e, "Fetch permit unavailable");
            None
        }
    }
}

/// Distinct ids in first-seen order.
fn dedup(ids: &[MovieId]) -> Vec<MovieId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
