//! Async database connection pool implementation.
//!
//! Uses bb8 with diesel_async; SQLite calls run on the blocking pool through
//! `SyncConnectionWrapper`.

use std::time::Duration;

use diesel::{ConnectionError, ConnectionResult, SqliteConnection};
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::cache::CacheStoreError;
use crate::config::DatabaseConfig;

pub type SqliteAsyncConnection = SyncConnectionWrapper<SqliteConnection>;

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap.
pub type AsyncDbPool = Pool<SqliteAsyncConnection>;

/// Applied to every pooled connection: writers wait on the lock instead of failing.
const CONNECTION_PRAGMAS: &str = "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;";

/// Creates the cache database pool.
///
/// # Errors
///
/// `CacheStoreError::Connection` when the pool cannot open its first connection.
///
/// # Example
///
/// ```ignore
/// let pool = establish_async_connection_pool(&settings.database).await?;
/// let mut conn = pool.get().await?;
/// ```
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, CacheStoreError> {
    let mut manager_config = ManagerConfig::<SqliteAsyncConnection>::default();
    manager_config.custom_setup = Box::new(establish_connection);

    let manager = AsyncDieselConnectionManager::<SqliteAsyncConnection>::new_with_config(
        config.database_path(),
        manager_config,
    );

    Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| CacheStoreError::Connection(e.to_string()))
}

fn establish_connection(url: &str) -> BoxFuture<'_, ConnectionResult<SqliteAsyncConnection>> {
    async move {
        let mut conn = SqliteAsyncConnection::establish(url).await?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}
