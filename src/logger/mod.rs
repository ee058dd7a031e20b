//! `tracing-subscriber` setup: an optional console layer and an optional
//! file layer in full, compact or JSON format.

pub mod config;
pub mod error;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber described by `config`.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    // RUST_LOG wins over the configured level when present
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(config.level()?.as_str()),
    };

    // File layer goes first so console ANSI codes never reach the file.
    // See: https://github.com/tokio-rs/tracing/issues/1817
    let file_layer = if config.file.enabled {
        let writer = Mutex::new(open_log_file(&config.file)?);
        let layer = fmt::layer().with_ansi(false).with_target(true);
        Some(match config.file.format {
            LogFormat::Full => layer.with_writer(writer).boxed(),
            LogFormat::Compact => layer.compact().with_writer(writer).boxed(),
            LogFormat::Json => layer.json().with_writer(writer).boxed(),
        })
    } else {
        None
    };

    let console_layer = config.console.enabled.then(|| {
        fmt::layer()
            .with_ansi(config.console.colored && std::io::stdout().is_terminal())
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    Ok(())
}

/// Open the log file, creating its parent directory when missing.
fn open_log_file(config: &FileConfig) -> Result<File, LoggerError> {
    let open = || {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(config.append)
            .write(true)
            .truncate(!config.append)
            .open(&config.path)
    };

    open().map_err(|source| LoggerError::OpenFile {
        path: config.path.clone(),
        source,
    })
}
