//! The `[logger]` table: level filter plus console and file outputs.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level; `RUST_LOG` replaces it when set.
    pub level: String,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl LoggerConfig {
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.level.trim().parse::<Level>().map_err(|_| {
            ConfigError::invalid(
                "logger.level",
                format!(
                    "unknown level '{}', expected one of trace, debug, info, warn, error",
                    self.level
                ),
            )
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::invalid(
                "logger",
                "console and file output are both disabled",
            ));
        }

        if self.file.enabled && self.file.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid(
                "logger.file.path",
                "a path is required while file output is enabled",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colors; only honored when stdout is a terminal.
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    /// Keep earlier runs' lines instead of truncating on startup.
    pub append: bool,
    pub format: LogFormat,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/flickstream.log"),
            append: true,
            format: LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
    #[default]
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_log_to_console_at_info() {
        let config = LoggerConfig::default();
        assert_eq!(config.level().unwrap(), Level::INFO);
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let config = LoggerConfig {
            level: "WARN".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level().unwrap(), Level::WARN);

        let config = LoggerConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field(), Some("logger.level"));
    }

    #[test]
    fn test_some_output_must_be_enabled() {
        let config = LoggerConfig {
            console: ConsoleConfig {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field(), Some("logger"));
    }

    #[test]
    fn test_enabled_file_needs_path() {
        let config = LoggerConfig {
            file: FileConfig {
                enabled: true,
                path: PathBuf::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err().field(),
            Some("logger.file.path")
        );
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let config: LoggerConfig = toml::from_str(
            r#"
            level = "debug"

            [file]
            enabled = true
            format = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(config.level, "debug");
        assert!(config.console.colored);
        assert_eq!(config.file.path, PathBuf::from("logs/flickstream.log"));
        assert_eq!(config.file.format, LogFormat::Compact);
        assert!(config.file.append);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: Result<FileConfig, _> = toml::from_str(r#"format = "xml""#);
        assert!(result.is_err());
    }
}
