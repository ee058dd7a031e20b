//! Cache-aside layer over the persistent cache store.
//!
//! Records live in three namespaces (watchlist snapshots, provider entries and
//! detail entries) and carry the wall-clock time of their write. Freshness is
//! never enforced by the store itself: readers decide with [`freshness::is_fresh`].
//!
//! # Configuration
//!
//! ```toml
//! [cache]
//! backend = "sqlite"        # or "memory" or "none"
//! watchlist_ttl_hours = 6
//! metadata_ttl_hours = 24
//! concurrency_width = 10
//! cache_placeholders = true
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let reconciler = BatchReconciler::new(store, clock, 10);
//! let providers = reconciler
//!     .reconcile(Namespace::Providers, 24, &ids, move |id| {
//!         let catalog = catalog.clone();
//!         async move { catalog.watch_providers(id).await }
//!     })
//!     .await;
//! ```

mod aggregator;
mod clock;
mod error;
pub mod freshness;
mod manager;
mod memory;
mod noop;
mod reconciler;
mod sqlite;
mod traits;

pub use aggregator::{WatchlistAggregator, aggregate_pages};
#[cfg(test)]
pub(crate) use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use error::CacheStoreError;
pub use freshness::{Category, TtlPolicy, is_fresh};
pub use manager::init_cache_store;
pub use memory::MemoryCacheStore;
pub use noop::NoOpCacheStore;
pub use reconciler::{BatchReconciler, PlaceholderPolicy};
pub use sqlite::DieselCacheStore;
pub use traits::{CacheStore, CachedRecord, Namespace, NamespaceStats};

// Re-export config types
pub use crate::config::settings::{CacheBackend, CacheConfig};
