//! Cache store error types.

use thiserror::Error;

/// Errors raised by a cache store backend.
///
/// Callers of the cache-aside layer never surface these to end users: a failed
/// read is treated as a miss and a failed write is logged and dropped.
#[derive(Error, Debug)]
pub enum CacheStoreError {
    #[error("Cache store connection failed: {0}")]
    Connection(String),

    #[error("Cache store query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Cache payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache store migration failed: {0}")]
    Migration(String),

    #[error("Cache store task failed: {0}")]
    Task(String),
}
