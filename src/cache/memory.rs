//! Process-local cache store backed by DashMap.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;

use crate::cache::{CacheStore, CacheStoreError, CachedRecord, Namespace, NamespaceStats};

/// In-memory store with the same semantics as the SQLite backend.
///
/// Entries never expire on their own and are lost on restart.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<(Namespace, String), CachedRecord>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get_many(
        &self,
        namespace: Namespace,
        keys: &[String],
    ) -> Result<HashMap<String, CachedRecord>, CacheStoreError> {
        Ok(keys
            .iter()
            .filter_map(|key| {
                self.entries
                    .get(&(namespace, key.clone()))
                    .map(|record| (key.clone(), record.value().clone()))
            })
            .collect())
    }

    async fn put_many(
        &self,
        namespace: Namespace,
        entries: HashMap<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<(), CacheStoreError> {
        for (key, payload) in entries {
            self.entries.insert(
                (namespace, key),
                CachedRecord {
                    payload,
                    cached_at: now,
                },
            );
        }
        Ok(())
    }

    async fn clear_namespace(&self, namespace: Namespace) -> Result<u64, CacheStoreError> {
        let before = self.entries.len();
        self.entries.retain(|(ns, _), _| *ns != namespace);
        Ok((before - self.entries.len()) as u64)
    }

    async fn count_and_latest(
        &self,
        namespace: Namespace,
    ) -> Result<NamespaceStats, CacheStoreError> {
        let mut stats = NamespaceStats::default();
        for entry in self.entries.iter().filter(|e| e.key().0 == namespace) {
            stats.count += 1;
            stats.latest = stats.latest.max(Some(entry.value().cached_at));
        }
        Ok(stats)
    }

    async fn payloads(&self, namespace: Namespace) -> Result<Vec<Value>, CacheStoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.key().0 == namespace)
            .map(|e| e.value().payload.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    #[tokio::test]
    async fn test_overwrite_and_stats() {
        let store = MemoryCacheStore::new();
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        store
            .put_one(Namespace::Details, "1", json!({"runtime": 90}), t0)
            .await
            .unwrap();
        store
            .put_one(Namespace::Details, "1", json!({"runtime": 91}), t0 + Duration::hours(1))
            .await
            .unwrap();
        store
            .put_one(Namespace::Providers, "1", json!({}), t0)
            .await
            .unwrap();

        let stats = store.count_and_latest(Namespace::Details).await.unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.latest, Some(t0 + Duration::hours(1)));

        let found = store
            .get_many(Namespace::Details, &["1".to_string(), "2".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["1"].payload, json!({"runtime": 91}));
    }

    #[tokio::test]
    async fn test_clear_namespace_counts_removed() {
        let store = MemoryCacheStore::new();
        let now = Utc::now();
        let entries = HashMap::from([
            ("1".to_string(), json!({})),
            ("2".to_string(), json!({})),
        ]);
        store
            .put_many(Namespace::Providers, entries, now)
            .await
            .unwrap();
        store
            .put_one(Namespace::Watchlist, "acct", json!([]), now)
            .await
            .unwrap();

        assert_eq!(store.clear_namespace(Namespace::Providers).await.unwrap(), 2);
        assert_eq!(store.clear_namespace(Namespace::Providers).await.unwrap(), 0);
        assert_eq!(store.payloads(Namespace::Watchlist).await.unwrap().len(), 1);
    }
}
