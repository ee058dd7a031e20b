//! Typed view of the merged configuration sources.
//!
//! Every table and key is optional; anything left out falls back to the
//! `Default` of its section.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::environment::Environment;
use crate::logger::LoggerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub application: ApplicationConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub tmdb: TmdbConfig,
    pub cache: CacheConfig,
    pub logger: LoggerConfig,
}

/// Name and version reported in startup logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    pub version: String,
    /// Set by the loader from the layer it selected; never read from files.
    #[serde(skip)]
    pub environment: Environment,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "flickstream".to_string(),
            version: crate::pkg_version().to_string(),
            environment: Environment::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whole-request deadline in seconds.
    pub request_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            request_timeout: 30,
        }
    }
}

/// SQLite file backing the cache table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Plain path, `sqlite://` or `sqlite:` URL, or `:memory:`.
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout: u64,
    /// Apply pending migrations before serving.
    pub auto_migrate: bool,
}

impl DatabaseConfig {
    /// `url` with any SQLite scheme stripped.
    pub fn database_path(&self) -> &str {
        ["sqlite://", "sqlite:"]
            .iter()
            .find_map(|scheme| self.url.strip_prefix(scheme))
            .unwrap_or(&self.url)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "flickstream_cache.db".to_string(),
            max_connections: 8,
            connection_timeout: 30,
            auto_migrate: true,
        }
    }
}

/// How the credential is attached to catalog requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// `api_key` query parameter
    #[default]
    ApiKey,
    /// `Authorization: Bearer` header
    Bearer,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::ApiKey => "api_key",
            AuthMethod::Bearer => "bearer",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog account and API access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API root without a trailing slash.
    pub base_url: String,
    /// Key or bearer token depending on `auth_method`. May be empty.
    pub api_key: String,
    /// Account whose watchlist is served.
    pub account_id: String,
    pub auth_method: AuthMethod,
    /// Country code used for provider lookups.
    pub region: String,
    /// Services listed first by `/api/streaming-services`.
    pub streaming_services: Vec<String>,
    /// Per-request timeout in seconds.
    pub request_timeout: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key: String::new(),
            account_id: String::new(),
            auth_method: AuthMethod::default(),
            region: "US".to_string(),
            streaming_services: Vec::new(),
            request_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Table in the SQLite database, shared by every worker.
    #[default]
    Sqlite,
    /// Process-local map, gone on restart.
    Memory,
    /// Nothing is kept; every request goes upstream.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub watchlist_ttl_hours: u32,
    /// Shared by provider and runtime entries.
    pub metadata_ttl_hours: u32,
    /// Upstream calls in flight per reconcile.
    pub concurrency_width: usize,
    /// Persist placeholders for failed fetches until they expire.
    pub cache_placeholders: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Sqlite,
            watchlist_ttl_hours: 6,
            metadata_ttl_hours: 24,
            concurrency_width: 10,
            cache_placeholders: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogFormat;

    #[test]
    fn test_empty_document_yields_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server.address(), "127.0.0.1:5000");
        assert_eq!(settings.tmdb.region, "US");
        assert_eq!(settings.cache.backend, CacheBackend::Sqlite);
        assert_eq!((settings.cache.watchlist_ttl_hours, settings.cache.metadata_ttl_hours), (6, 24));
        assert_eq!(settings.cache.concurrency_width, 10);
        assert!(settings.cache.cache_placeholders);
    }

    #[test]
    fn test_partial_tables_fill_from_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [tmdb]
            api_key = "abc123"
            auth_method = "bearer"
            streaming_services = ["Netflix", "Hulu"]

            [cache]
            backend = "memory"
            cache_placeholders = false

            [logger.file]
            enabled = true
            format = "full"
            "#,
        )
        .unwrap();

        assert_eq!(settings.tmdb.auth_method, AuthMethod::Bearer);
        assert_eq!(settings.tmdb.streaming_services, vec!["Netflix", "Hulu"]);
        assert_eq!(settings.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(settings.cache.backend, CacheBackend::Memory);
        assert!(!settings.cache.cache_placeholders);
        assert_eq!(settings.cache.metadata_ttl_hours, 24);
        assert_eq!(settings.logger.file.format, LogFormat::Full);
        assert!(settings.logger.console.enabled);
    }

    #[test]
    fn test_unknown_cache_backend_is_rejected() {
        let result: Result<Settings, _> = toml::from_str("[cache]\nbackend = \"redis\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_database_path_strips_scheme() {
        for (url, expected) in [
            ("sqlite://data/cache.db", "data/cache.db"),
            ("sqlite:cache.db", "cache.db"),
            ("cache.db", "cache.db"),
            (":memory:", ":memory:"),
        ] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert_eq!(config.database_path(), expected, "url: {}", url);
        }
    }

    #[test]
    fn test_auth_method_names() {
        assert_eq!(AuthMethod::ApiKey.to_string(), "api_key");
        let settings: Settings = toml::from_str("[tmdb]\nauth_method = \"bearer\"").unwrap();
        assert_eq!(settings.tmdb.auth_method.to_string(), "bearer");
    }
}
