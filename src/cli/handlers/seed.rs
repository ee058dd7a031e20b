//! Seed command handler
//!
//! Writes the development fixture into the configured cache store.

use crate::cache::{SystemClock, init_cache_store};
use crate::config::settings::{CacheBackend, Settings};
use crate::error::{AppError, AppResult};
use crate::services::seed::{SeedReport, seed};

/// Handler for the seed command
pub struct SeedCommandHandler {
    config: Settings,
}

impl SeedCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Seed the fixture under `account_id`.
    ///
    /// Only a SQLite store outlives the process, so the other backends are
    /// rejected up front.
    pub async fn execute(&self, account_id: &str) -> AppResult<SeedReport> {
        if self.config.cache.backend != CacheBackend::Sqlite {
            return Err(AppError::validation(
                "cache.backend",
                format!(
                    "Seeding needs the sqlite backend, configured backend is {:?}",
                    self.config.cache.backend
                ),
            ));
        }

        let store = init_cache_store(&self.config.cache, &self.config.database)
            .await
            .map_err(|e| AppError::cache_store("open cache store", e))?;

        let report = seed(&store, &SystemClock, account_id)
            .await
            .map_err(|e| AppError::cache_store("seed fixture data", e))?;

        tracing::info!(
            account_id,
            movies = report.movies,
            providers = report.providers,
            runtimes = report.runtimes,
            "Fixture data seeded"
        );
        println!(
            "✓ Seeded {} movies, {} provider entries and {} runtimes for account '{}'",
            report.movies, report.providers, report.runtimes, account_id
        );
        if self.config.tmdb.account_id != account_id {
            println!(
                "  Set tmdb.account_id = \"{}\" to serve this watchlist",
                account_id
            );
        }

        Ok(report)
    }
}
