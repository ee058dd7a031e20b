//! Cache administration: bulk clear and per-namespace statistics.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::{CacheStore, Namespace, TtlPolicy};
use crate::error::{AppError, AppResult};
use crate::services::GenreCatalog;

/// Rows removed from one namespace by a bulk clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedNamespace {
    pub namespace: Namespace,
    pub removed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceSummary {
    pub namespace: Namespace,
    pub count: u64,
    pub latest: Option<DateTime<Utc>>,
    pub ttl_hours: u32,
}

#[derive(Clone)]
pub struct CacheService {
    store: Arc<dyn CacheStore>,
    genres: GenreCatalog,
    ttl: TtlPolicy,
}

impl CacheService {
    pub fn new(store: Arc<dyn CacheStore>, genres: GenreCatalog, ttl: TtlPolicy) -> Self {
        Self { store, genres, ttl }
    }

    pub fn backend(&self) -> &'static str {
        self.store.name()
    }

    /// Remove every record in every namespace and drop the loaded genre table.
    ///
    /// Namespaces are cleared one after another; a failure stops the sweep and
    /// the namespaces already cleared stay cleared.
    pub async fn clear(&self) -> AppResult<Vec<ClearedNamespace>> {
        let mut cleared = Vec::with_capacity(Namespace::ALL.len());
        for namespace in Namespace::ALL {
            let removed = self
                .store
                .clear_namespace(namespace)
                .await
                .map_err(|e| AppError::cache_store("clear", e))?;
            cleared.push(ClearedNamespace { namespace, removed });
        }

        self.genres.invalidate().await;

        let total: u64 = cleared.iter().map(|c| c.removed).sum();
        tracing::info!(backend = self.store.name(), total, "Cache cleared");
        Ok(cleared)
    }

    pub async fn stats(&self) -> AppResult<Vec<NamespaceSummary>> {
        let mut summaries = Vec::with_capacity(Namespace::ALL.len());
        for namespace in Namespace::ALL {
            let stats = self
                .store
                .count_and_latest(namespace)
                .await
                .map_err(|e| AppError::cache_store("stats", e))?;
            summaries.push(NamespaceSummary {
                namespace,
                count: stats.count,
                latest: stats.latest,
                ttl_hours: self.ttl.ttl_hours(namespace.category()),
            });
        }
        Ok(summaries)
    }

    /// Round-trip to the backing store, used by the readiness check.
    pub async fn ping(&self) -> AppResult<()> {
        self.store
            .ping()
            .await
            .map_err(|e| AppError::cache_store("ping", e))
    }
}
