//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::settings::{CacheBackend, Settings};
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the serve command
    ///
    /// With `dry_run` the configuration is validated and summarized, and
    /// nothing is opened or bound.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Cache store, bind or runtime errors (if not dry-run)
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config.clone()).run().await?;
        Ok(())
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.cache.backend {
            CacheBackend::Sqlite => println!(
                "✓ Cache store: sqlite at {}",
                self.config.database.database_path()
            ),
            CacheBackend::Memory => println!("✓ Cache store: memory (lost on restart)"),
            CacheBackend::None => println!("✓ Cache store: disabled"),
        }
        if self.config.tmdb.api_key.is_empty() {
            println!("! No TMDb API key configured");
        } else {
            println!("✓ TMDb API key configured ({})", self.config.tmdb.auth_method);
        }
        if self.config.tmdb.account_id.is_empty() {
            println!("! No TMDb account id configured; the watchlist will be empty");
        }

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
