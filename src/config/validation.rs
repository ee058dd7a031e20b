//! Range and format checks run after every load and CLI merge.

use crate::config::error::ConfigError;
use crate::config::settings::{CacheConfig, DatabaseConfig, ServerConfig, Settings, TmdbConfig};

/// Upstream fetches in flight per reconcile call.
pub const MAX_CONCURRENCY_WIDTH: usize = 64;

/// Ten years; keeps `cached_at + ttl` well inside chrono's date range.
pub const MAX_TTL_HOURS: u32 = 24 * 365 * 10;

fn ensure(ok: bool, field: &str, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, message()))
    }
}

fn ensure_ttl(hours: u32, field: &str) -> Result<(), ConfigError> {
    ensure((1..=MAX_TTL_HOURS).contains(&hours), field, || {
        format!("must be between 1 and {} hours, got {}", MAX_TTL_HOURS, hours)
    })
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.port != 0, "server.port", || "port 0 is not bindable".into())?;
        ensure(self.request_timeout > 0, "server.request_timeout", || {
            "must be at least 1 second".into()
        })
    }
}

impl DatabaseConfig {
    /// Only SQLite locations are accepted; network database URLs are refused.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(!self.database_path().trim().is_empty(), "database.url", || {
            "a SQLite file path is required".into()
        })?;
        let foreign = ["postgres://", "postgresql://", "mysql://", "redis://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme));
        ensure(!foreign, "database.url", || {
            format!("'{}' is not a SQLite location", self.url)
        })?;
        ensure(self.max_connections > 0, "database.max_connections", || {
            "the pool needs at least one connection".into()
        })?;
        ensure(self.connection_timeout > 0, "database.connection_timeout", || {
            "must be at least 1 second".into()
        })
    }
}

impl TmdbConfig {
    /// An empty API key passes; requests then fail upstream and `/api/debug`
    /// reports the key as missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        ensure(
            base_url.starts_with("http://") || base_url.starts_with("https://"),
            "tmdb.base_url",
            || format!("'{}' is not an http(s) URL", base_url),
        )?;
        ensure(!self.region.trim().is_empty(), "tmdb.region", || {
            "a country code such as US is required".into()
        })?;
        ensure(self.request_timeout > 0, "tmdb.request_timeout", || {
            "must be at least 1 second".into()
        })
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_ttl(self.watchlist_ttl_hours, "cache.watchlist_ttl_hours")?;
        ensure_ttl(self.metadata_ttl_hours, "cache.metadata_ttl_hours")?;
        ensure(
            (1..=MAX_CONCURRENCY_WIDTH).contains(&self.concurrency_width),
            "cache.concurrency_width",
            || {
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_CONCURRENCY_WIDTH, self.concurrency_width
                )
            },
        )
    }
}

impl Settings {
    /// Sections are checked in file order; the first failure is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.tmdb.validate()?;
        self.cache.validate()?;
        self.logger.validate()
    }
}
