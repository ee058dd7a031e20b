//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::services::seed::DEV_ACCOUNT_ID;

/// Caching backend for a personal movie watchlist
#[derive(Parser, Debug)]
#[command(name = "flickstream")]
#[command(about = "Caching backend for a personal movie watchlist")]
#[command(long_about = "
Flickstream serves a TMDb account's movie watchlist together with streaming
provider and runtime data. Catalog responses are cached in SQLite so repeat
requests avoid upstream calls until the cached entries expire.

EXAMPLES:
    # Start the server with default configuration
    flickstream serve

    # Start server on custom host and port
    flickstream serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    flickstream --config /path/to/config.toml serve

    # Run in development mode with verbose logging
    flickstream --env development --verbose serve

    # Check configuration without starting server
    flickstream serve --dry-run

    # Run database migrations
    flickstream migrate

    # Preview pending migrations
    flickstream migrate --dry-run

    # Fill the cache with a small fixture watchlist
    flickstream seed

For more information about configuration options, see config/default.toml.
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load only this TOML file instead of the layered files under config/.
    /// FLICKSTREAM_* environment variables still apply on top of it.
    ///
    /// Example: --config /etc/flickstream/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which {environment}.toml layer is loaded after default.toml.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Opens the cache store, applies pending migrations when enabled and
    /// begins accepting requests.
    ///
    /// Examples:
    ///   flickstream serve                           # Start with defaults
    ///   flickstream serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   flickstream serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections from any interface.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Must be between 1 and 65535.
        ///
        /// Default: 5000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over the configuration file and the global --verbose/--quiet flags.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Returns exit code 0 if the configuration is valid, non-zero otherwise.
        #[arg(long)]
        dry_run: bool,
    },
    /// Cache database migration operations
    ///
    /// Examples:
    ///   flickstream migrate                    # Apply all pending migrations
    ///   flickstream migrate --dry-run          # Show pending migrations without applying
    ///   flickstream migrate --rollback 1       # Rollback the last migration
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback
        ///
        /// Reverting the cache table drops every cached entry.
        /// Must be between 1 and 100.
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
    /// Write a fixture watchlist into the cache
    ///
    /// Clears the provider and details namespaces, then stores five movies
    /// with providers and runtimes so the API can be exercised offline.
    ///
    /// Examples:
    ///   flickstream seed
    ///   flickstream seed --account-id 12345
    Seed {
        /// Account key the fixture watchlist is stored under
        #[arg(long, value_name = "ID", default_value = DEV_ACCOUNT_ID)]
        account_id: String,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Some(Commands::Migrate { dry_run, rollback }) if *dry_run && rollback.is_some() => {
                return Err("Cannot use --dry-run and --rollback together".to_string());
            }
            Some(Commands::Seed { account_id }) if account_id.trim().is_empty() => {
                return Err("Seed account id cannot be empty".to_string());
            }
            _ => {}
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
