//! Outbound integrations.

mod client;
mod error;
pub mod tmdb;

pub use client::build_http_client;
pub use error::UpstreamError;
pub use tmdb::{CatalogSource, Page, TmdbClient};
