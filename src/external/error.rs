//! Errors raised while talking to the catalog API.

use reqwest::StatusCode;
use thiserror::Error;

/// Every way an outbound catalog call can fail.
///
/// Each variant keeps the request path so logs show which call failed; the
/// credential is never part of it.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS or timeout failure before a response arrived.
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived with a non-2xx status.
    #[error("request to {path} returned {status}: {body}")]
    Status {
        path: String,
        status: StatusCode,
        body: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("unexpected response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL and path do not form a valid URL.
    #[error("invalid request url for {path}: {reason}")]
    InvalidUrl { path: String, reason: String },
}

impl UpstreamError {
    pub fn path(&self) -> &str {
        match self {
            UpstreamError::Transport { path, .. }
            | UpstreamError::Status { path, .. }
            | UpstreamError::Decode { path, .. }
            | UpstreamError::InvalidUrl { path, .. } => path,
        }
    }

    /// HTTP status of the failed response, if one arrived.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Transport { source, .. } if source.is_timeout())
    }
}
