//! NoOp cache store.
//!
//! Used when `cache.backend = "none"`. Nothing is stored, so every read misses.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::cache::{CacheStore, CacheStoreError, CachedRecord, Namespace, NamespaceStats};

#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCacheStore;

impl NoOpCacheStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheStore for NoOpCacheStore {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn get_many(
        &self,
        _namespace: Namespace,
        _keys: &[String],
    ) -> Result<HashMap<String, CachedRecord>, CacheStoreError> {
        Ok(HashMap::new())
    }

    async fn put_many(
        &self,
        _namespace: Namespace,
        _entries: HashMap<String, Value>,
        _now: DateTime<Utc>,
    ) -> Result<(), CacheStoreError> {
        Ok(())
    }

    async fn clear_namespace(&self, _namespace: Namespace) -> Result<u64, CacheStoreError> {
        Ok(0)
    }

    async fn count_and_latest(
        &self,
        _namespace: Namespace,
    ) -> Result<NamespaceStats, CacheStoreError> {
        Ok(NamespaceStats::default())
    }

    async fn payloads(&self, _namespace: Namespace) -> Result<Vec<Value>, CacheStoreError> {
        Ok(Vec::new())
    }
}
