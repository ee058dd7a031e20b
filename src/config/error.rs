//! Failures while reading or checking settings.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required config file {} does not exist", .0.display())]
    Missing(PathBuf),

    /// The merged sources do not fit the `Settings` shape.
    #[error("cannot decode settings: {0}")]
    Decode(String),

    #[error("invalid `{field}`: {message}")]
    Invalid { field: String, message: String },

    /// An environment variable holds a value outside its allowed set.
    #[error("bad environment variable: {0}")]
    Environment(String),

    /// Two loader inputs that cannot be combined were both given.
    #[error("conflicting config sources: {0}")]
    Conflict(String),

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted settings key the error points at, when it names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_names_its_field() {
        let err = ConfigError::invalid("cache.concurrency_width", "must be between 1 and 64");
        assert_eq!(err.field(), Some("cache.concurrency_width"));
        assert_eq!(
            err.to_string(),
            "invalid `cache.concurrency_width`: must be between 1 and 64"
        );
    }

    #[test]
    fn test_missing_file_message_shows_path() {
        let err = ConfigError::Missing(PathBuf::from("config/default.toml"));
        assert!(err.field().is_none());
        assert!(err.to_string().contains("config/default.toml"));
    }
}
