//! SQLite connection pooling and embedded migrations.
//!
//! Uses diesel_async's `SyncConnectionWrapper` over diesel's SQLite driver with a bb8 pool.

mod migrations;
mod pool;

pub use migrations::{MIGRATIONS, pending_migrations, revert_migrations, run_migrations};
pub use pool::{AsyncDbPool, SqliteAsyncConnection, establish_async_connection_pool};
