//! Cache administration DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cache::Namespace;
use crate::services::{ClearedNamespace, NamespaceSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NamespaceStatsResponse {
    pub cached_entries: u64,
    /// Time of the most recent write, if any
    pub latest_cache: Option<DateTime<Utc>>,
    pub cache_duration_hours: u32,
}

impl From<NamespaceSummary> for NamespaceStatsResponse {
    fn from(summary: NamespaceSummary) -> Self {
        Self {
            cached_entries: summary.count,
            latest_cache: summary.latest,
            cache_duration_hours: summary.ttl_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CacheStatsResponse {
    /// Store backend in use: sqlite, memory or none
    pub backend: String,
    pub watchlist: NamespaceStatsResponse,
    pub providers: NamespaceStatsResponse,
    pub details: NamespaceStatsResponse,
}

impl CacheStatsResponse {
    pub fn new(backend: &str, summaries: Vec<NamespaceSummary>) -> Self {
        let pick = |namespace: Namespace| {
            summaries
                .iter()
                .find(|s| s.namespace == namespace)
                .copied()
                .map(NamespaceStatsResponse::from)
                .unwrap_or(NamespaceStatsResponse {
                    cached_entries: 0,
                    latest_cache: None,
                    cache_duration_hours: 0,
                })
        };

        Self {
            backend: backend.to_string(),
            watchlist: pick(Namespace::Watchlist),
            providers: pick(Namespace::Providers),
            details: pick(Namespace::Details),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RemovedCounts {
    pub watchlist: u64,
    pub providers: u64,
    pub details: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "success": true,
    "message": "Cache cleared successfully",
    "rows_deleted": 42,
    "removed": {"watchlist": 1, "providers": 25, "details": 16}
}))]
pub struct ClearCacheResponse {
    pub success: bool,
    pub message: String,
    /// Total rows removed across namespaces
    pub rows_deleted: u64,
    pub removed: RemovedCounts,
}

impl From<Vec<ClearedNamespace>> for ClearCacheResponse {
    fn from(cleared: Vec<ClearedNamespace>) -> Self {
        let mut removed = RemovedCounts::default();
        for entry in &cleared {
            match entry.namespace {
                Namespace::Watchlist => removed.watchlist = entry.removed,
                Namespace::Providers => removed.providers = entry.removed,
                Namespace::Details => removed.details = entry.removed,
            }
        }

        Self {
            success: true,
            message: "Cache cleared successfully".to_string(),
            rows_deleted: removed.watchlist + removed.providers + removed.details,
            removed,
        }
    }
}
