//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{SystemClock, init_cache_store};
use crate::config::settings::Settings;
use crate::error::AppError;
use crate::external::{TmdbClient, build_http_client};
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since every service keeps its shared parts behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// Build the production state: cache store per `cache.backend`, one shared
    /// HTTP client and the TMDb catalog behind it.
    ///
    /// # Example
    /// ```ignore
    /// let state = AppState::from_settings(&settings).await?;
    /// ```
    pub async fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let store = init_cache_store(&settings.cache, &settings.database)
            .await
            .map_err(|e| AppError::cache_store("init", e))?;

        let http = build_http_client(Duration::from_secs(settings.tmdb.request_timeout))
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::new(e).context("failed to build HTTP client"),
            })?;
        let client = TmdbClient::new(http, &settings.tmdb);

        let services = Services::new(
            settings,
            store,
            Arc::new(client.clone()),
            client,
            Arc::new(SystemClock),
        );
        Ok(Self::new(services))
    }
}
