use thiserror::Error;

use crate::cache::CacheStoreError;
use crate::config::ConfigError;
use crate::external::UpstreamError;

/// Application-wide error type.
///
/// Only `Validation` and `BadRequest` reach end users during normal operation;
/// the cache-aside paths degrade upstream and store failures instead of
/// returning them.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed client input, with the offending field
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Catalog call failed where no degraded answer exists
    #[error("Upstream request failed: {operation}")]
    Upstream {
        operation: String,
        #[source]
        source: UpstreamError,
    },

    /// Cache store failure on an operation that cannot degrade, such as clear or stats
    #[error("Cache store operation failed: {operation}")]
    CacheStore {
        operation: String,
        #[source]
        source: CacheStoreError,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn cache_store(operation: impl Into<String>, source: CacheStoreError) -> Self {
        AppError::CacheStore {
            operation: operation.into(),
            source,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<UpstreamError> for AppError {
    fn from(error: UpstreamError) -> Self {
        AppError::Upstream {
            operation: error.path().to_string(),
            source: error,
        }
    }
}

impl From<CacheStoreError> for AppError {
    fn from(error: CacheStoreError) -> Self {
        AppError::CacheStore {
            operation: "cache store operation".to_string(),
            source: error,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.field().unwrap_or("settings").to_string();
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// Report the first failing field, in field-name order.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string());
                AppError::validation(field.to_string(), reason)
            }
            None => AppError::validation("request", errors.to_string()),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
