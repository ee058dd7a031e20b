//! Embedded schema migrations.
//!
//! The harness is synchronous, so every helper opens its own connection on the
//! blocking pool.

use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::cache::CacheStoreError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Names of migrations not yet applied.
pub async fn pending_migrations(database_path: &str) -> Result<Vec<String>, CacheStoreError> {
    with_connection(database_path, |conn| {
        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| CacheStoreError::Migration(e.to_string()))?;
        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
}

/// Apply pending migrations, returning the names applied.
pub async fn run_migrations(database_path: &str) -> Result<Vec<String>, CacheStoreError> {
    with_connection(database_path, |conn| {
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| CacheStoreError::Migration(e.to_string()))?;
        Ok(applied.iter().map(|m| m.to_string()).collect())
    })
    .await
}

/// Revert the `steps` most recent migrations, returning the names reverted.
pub async fn revert_migrations(
    database_path: &str,
    steps: u32,
) -> Result<Vec<String>, CacheStoreError> {
    with_connection(database_path, move |conn| {
        let applied = conn
            .applied_migrations()
            .map_err(|e| CacheStoreError::Migration(e.to_string()))?;

        if applied.len() < steps as usize {
            return Err(CacheStoreError::Migration(format!(
                "Cannot rollback {} migrations - only {} applied migrations available",
                steps,
                applied.len()
            )));
        }

        let mut reverted = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            let version = conn
                .revert_last_migration(MIGRATIONS)
                .map_err(|e| CacheStoreError::Migration(e.to_string()))?;
            reverted.push(version.to_string());
        }
        Ok(reverted)
    })
    .await
}

async fn with_connection<T, F>(database_path: &str, f: F) -> Result<T, CacheStoreError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, CacheStoreError> + Send + 'static,
{
    let database_path = database_path.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = SqliteConnection::establish(&database_path)
            .map_err(|e| CacheStoreError::Connection(e.to_string()))?;
        f(&mut conn)
    })
    .await
    .map_err(|e| CacheStoreError::Task(e.to_string()))?
}
