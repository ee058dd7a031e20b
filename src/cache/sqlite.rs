//! SQLite-backed cache store using diesel_async.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, max};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use serde_json::Value;

use crate::cache::{CacheStore, CacheStoreError, CachedRecord, Namespace, NamespaceStats};
use crate::db::AsyncDbPool;
use crate::models::{CacheEntry, NewCacheEntry};

/// Keys per `IN (...)` lookup, kept under SQLite's bound-parameter limit.
const CHUNK_SIZE: usize = 200;

/// Persistent store over the `cache_entries` table.
///
/// Cloning is cheap; the pool is reference counted.
#[derive(Clone)]
pub struct DieselCacheStore {
    pool: AsyncDbPool,
}

impl DieselCacheStore {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, crate::db::SqliteAsyncConnection>,
        CacheStoreError,
    > {
        self.pool
            .get()
            .await
            .map_err(|e| CacheStoreError::Connection(e.to_string()))
    }
}

#[async_trait]
impl CacheStore for DieselCacheStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn get_many(
        &self,
        namespace: Namespace,
        keys: &[String],
    ) -> Result<HashMap<String, CachedRecord>, CacheStoreError> {
        use crate::schema::cache_entries::dsl;

        let mut records = HashMap::with_capacity(keys.len());
        if keys.is_empty() {
            return Ok(records);
        }

        let mut conn = self.connection().await?;
        for chunk in keys.chunks(CHUNK_SIZE) {
            let rows: Vec<CacheEntry> = dsl::cache_entries
                .filter(dsl::namespace.eq(namespace.as_str()))
                .filter(dsl::cache_key.eq_any(chunk))
                .select(CacheEntry::as_select())
                .load(&mut conn)
                .await?;

            for row in rows {
                match serde_json::from_str::<Value>(&row.data) {
                    Ok(payload) => {
                        records.insert(
                            row.cache_key,
                            CachedRecord {
                                payload,
                                cached_at: row.cached_at.and_utc(),
                            },
                        );
                    }
                    // Unreadable rows count as misses and are overwritten by the next write.
                    Err(e) => tracing::warn!(
                        namespace = %namespace,
                        key = %row.cache_key,
                        error = %e,
                        "Skipping corrupt cache entry"
                    ),
                }
            }
        }

        Ok(records)
    }

    async fn put_many(
        &self,
        namespace: Namespace,
        entries: HashMap<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<(), CacheStoreError> {
        use crate::schema::cache_entries::dsl;

        if entries.is_empty() {
            return Ok(());
        }

        let cached_at = now.naive_utc();
        let rows = entries
            .iter()
            .map(|(key, payload)| -> Result<NewCacheEntry<'_>, CacheStoreError> {
                Ok(NewCacheEntry {
                    namespace: namespace.as_str(),
                    cache_key: key,
                    data: serde_json::to_string(payload)?,
                    cached_at,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let written = rows.len();
        // One transaction so a batch lands whole or not at all
        let mut conn = self.connection().await?;
        conn.transaction::<_, CacheStoreError, _>(|conn| {
            async move {
                // SQLite has no DEFAULT keyword, so multi-row VALUES is unavailable
                for row in &rows {
                    diesel::replace_into(dsl::cache_entries)
                        .values(row)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await?;

        tracing::debug!(namespace = %namespace, count = written, "Cache entries written");
        Ok(())
    }

    async fn clear_namespace(&self, namespace: Namespace) -> Result<u64, CacheStoreError> {
        use crate::schema::cache_entries::dsl;

        let mut conn = self.connection().await?;
        let removed = diesel::delete(dsl::cache_entries.filter(dsl::namespace.eq(namespace.as_str())))
            .execute(&mut conn)
            .await?;

        Ok(removed as u64)
    }

    async fn count_and_latest(
        &self,
        namespace: Namespace,
    ) -> Result<NamespaceStats, CacheStoreError> {
        use crate::schema::cache_entries::dsl;

        let mut conn = self.connection().await?;
        let (count, latest): (i64, Option<chrono::NaiveDateTime>) = dsl::cache_entries
            .filter(dsl::namespace.eq(namespace.as_str()))
            .select((count_star(), max(dsl::cached_at)))
            .first(&mut conn)
            .await?;

        Ok(NamespaceStats {
            count: count.max(0) as u64,
            latest: latest.map(|ts| ts.and_utc()),
        })
    }

    async fn payloads(&self, namespace: Namespace) -> Result<Vec<Value>, CacheStoreError> {
        use crate::schema::cache_entries::dsl;

        let mut conn = self.connection().await?;
        let rows: Vec<String> = dsl::cache_entries
            .filter(dsl::namespace.eq(namespace.as_str()))
            .select(dsl::data)
            .load(&mut conn)
            .await?;

        Ok(rows
            .iter()
            .filter_map(|data| serde_json::from_str(data).ok())
            .collect())
    }

    async fn ping(&self) -> Result<(), CacheStoreError> {
        let mut conn = self.connection().await?;
        diesel::sql_query("SELECT 1").execute(&mut conn).await?;
        Ok(())
    }
}
