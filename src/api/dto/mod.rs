//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `movie` - id list parsing and per-movie response maps
//! - `cache` - cache stats and clear responses
//! - `streaming` - streaming service list
//! - `health` - health checks
//! - `error` - Common error response DTOs

mod cache;
mod error;
mod health;
mod movie;
mod streaming;

pub use cache::{CacheStatsResponse, ClearCacheResponse, NamespaceStatsResponse, RemovedCounts};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use movie::{
    INVALID_IDS_MESSAGE, MovieDetailsResponse, MovieIdsQuery, NO_IDS_MESSAGE, ProvidersResponse,
};
pub use streaming::StreamingServicesResponse;
