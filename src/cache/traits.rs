//! CacheStore trait definition.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::cache::CacheStoreError;
use crate::cache::freshness::Category;

/// Logical partition of the cache store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Whole-watchlist snapshots keyed by account id.
    Watchlist,
    /// Region → offer type → services, keyed by movie id.
    Providers,
    /// `{runtime}` entries keyed by movie id.
    Details,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Namespace::Watchlist, Namespace::Providers, Namespace::Details];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Watchlist => "watchlist",
            Namespace::Providers => "providers",
            Namespace::Details => "details",
        }
    }

    /// TTL category the namespace is judged against.
    pub fn category(&self) -> Category {
        match self {
            Namespace::Watchlist => Category::Watchlist,
            Namespace::Providers | Namespace::Details => Category::Metadata,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "watchlist" => Ok(Namespace::Watchlist),
            "providers" => Ok(Namespace::Providers),
            "details" => Ok(Namespace::Details),
            other => Err(format!("Unknown cache namespace '{}'", other)),
        }
    }
}

/// A payload read back from the store together with its write time.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedRecord {
    pub payload: Value,
    pub cached_at: DateTime<Utc>,
}

/// Row count and newest write time of one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NamespaceStats {
    pub count: u64,
    pub latest: Option<DateTime<Utc>>,
}

/// Persistent key-value store with per-record timestamps.
///
/// Every call round-trips to the backing store; implementations must not keep
/// a read-through layer of their own.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Backend name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Fetch the records present for `keys`. Absent keys are omitted.
    async fn get_many(
        &self,
        namespace: Namespace,
        keys: &[String],
    ) -> Result<HashMap<String, CachedRecord>, CacheStoreError>;

    /// Replace the records for every key in `entries`, all stamped with `now`.
    async fn put_many(
        &self,
        namespace: Namespace,
        entries: HashMap<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<(), CacheStoreError>;

    /// Replace a single record.
    async fn put_one(
        &self,
        namespace: Namespace,
        key: &str,
        payload: Value,
        now: DateTime<Utc>,
    ) -> Result<(), CacheStoreError> {
        let entries = HashMap::from([(key.to_string(), payload)]);
        self.put_many(namespace, entries, now).await
    }

    /// Remove every record of a namespace, returning the number removed.
    async fn clear_namespace(&self, namespace: Namespace) -> Result<u64, CacheStoreError>;

    async fn count_and_latest(&self, namespace: Namespace)
    -> Result<NamespaceStats, CacheStoreError>;

    /// All payloads of a namespace regardless of age.
    async fn payloads(&self, namespace: Namespace) -> Result<Vec<Value>, CacheStoreError>;

    /// Cheap connectivity check used by readiness checks.
    async fn ping(&self) -> Result<(), CacheStoreError> {
        Ok(())
    }
}
