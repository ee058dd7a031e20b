//! Migrate command handler
//!
//! Handles cache database migrations including dry-run and rollback.

use crate::config::settings::Settings;
use crate::db::{pending_migrations, revert_migrations, run_migrations};
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    /// Create a new migrate command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support
    ///
    /// # Errors
    /// - Database connection errors
    /// - Migration execution errors
    /// - Configuration validation errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let path = self.config.database.database_path();

        if dry_run {
            let pending = pending_migrations(path)
                .await
                .map_err(|e| AppError::cache_store("check pending migrations", e))?;
            if pending.is_empty() {
                println!("✓ No pending migrations found - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
                println!("\nRun without --dry-run to apply these migrations");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            if steps == 0 {
                return Err(AppError::validation(
                    "rollback_steps",
                    "Number of rollback steps must be greater than 0",
                ));
            }

            println!("Rolling back {} migration(s)...", steps);
            let reverted = revert_migrations(path, steps)
                .await
                .map_err(|e| AppError::cache_store("revert migrations", e))?;
            println!("✓ Rolled back {} migration(s)", reverted.len());
            return Ok(());
        }

        println!("Running database migrations...");
        let applied = run_migrations(path)
            .await
            .map_err(|e| AppError::cache_store("run pending migrations", e))?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for migration in &applied {
                println!("  - {}", migration);
            }
        }

        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Settings {
        let mut config = Settings::default();
        config.database.url = dir.path().join("cache.db").display().to_string();
        config
    }

    #[test]
    fn test_migrate_handler_new() {
        let config = Settings::default();
        let handler = MigrateCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_migrate_apply_then_rollback() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let path = config.database.database_path().to_string();
        let handler = MigrateCommandHandler::new(config);

        handler.execute(true, None).await.unwrap();
        assert_eq!(pending_migrations(&path).await.unwrap().len(), 1);

        handler.execute(false, None).await.unwrap();
        assert!(pending_migrations(&path).await.unwrap().is_empty());

        handler.execute(false, Some(1)).await.unwrap();
        assert_eq!(pending_migrations(&path).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_migrate_handler_zero_rollback_steps() {
        let dir = TempDir::new().unwrap();
        let handler = MigrateCommandHandler::new(config_in(&dir));

        match handler.execute(false, Some(0)).await {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("must be greater than 0"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rollback_beyond_applied_is_cache_store_error() {
        let dir = TempDir::new().unwrap();
        let handler = MigrateCommandHandler::new(config_in(&dir));

        let err = handler.execute(false, Some(2)).await.unwrap_err();
        assert!(matches!(err, AppError::CacheStore { .. }));
    }
}
