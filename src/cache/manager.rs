//! Builds the cache store for the configured backend.

use std::sync::Arc;

use crate::cache::{
    CacheStore, CacheStoreError, DieselCacheStore, MemoryCacheStore, NoOpCacheStore,
};
use crate::config::settings::{CacheBackend, CacheConfig, DatabaseConfig};
use crate::db::{establish_async_connection_pool, run_migrations};

/// Initialize the cache store selected by `cache.backend`.
///
/// For SQLite this opens the pool and, when `database.auto_migrate` is set,
/// applies pending migrations first.
pub async fn init_cache_store(
    cache: &CacheConfig,
    database: &DatabaseConfig,
) -> Result<Arc<dyn CacheStore>, CacheStoreError> {
    let store: Arc<dyn CacheStore> = match cache.backend {
        CacheBackend::Sqlite => {
            if database.auto_migrate {
                let applied = run_migrations(database.database_path()).await?;
                if !applied.is_empty() {
                    tracing::info!(count = applied.len(), "Applied pending migrations");
                }
            }
            let pool = establish_async_connection_pool(database).await?;
            Arc::new(DieselCacheStore::new(pool))
        }
        CacheBackend::Memory => Arc::new(MemoryCacheStore::new()),
        CacheBackend::None => Arc::new(NoOpCacheStore::new()),
    };

    tracing::info!(backend = store.name(), "Cache store initialized");
    Ok(store)
}
