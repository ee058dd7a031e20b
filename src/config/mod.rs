//! Settings for the server and CLI.
//!
//! [`ConfigLoader`] documents the file and variable layers; CLI flags are
//! applied on top by `cli::config_merger`.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    AuthMethod, CacheBackend, CacheConfig, DatabaseConfig, Settings, TmdbConfig,
};
