//! Streaming service list built from configuration and cached provider data.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::cache::{CacheStore, CacheStoreError, Namespace};
use crate::models::WatchProviders;

/// Served when nothing is configured and cached provider data cannot be read.
pub const FALLBACK_SERVICES: [&str; 8] = [
    "Netflix",
    "Amazon Prime Video",
    "Disney Plus",
    "Hulu",
    "HBO Max",
    "Apple TV Plus",
    "Paramount Plus",
    "Peacock",
];

/// Where the returned service list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceSource {
    Configured,
    AutoDiscovered,
    Fallback,
}

impl fmt::Display for ServiceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ServiceSource::Configured => "configured",
            ServiceSource::AutoDiscovered => "auto-discovered",
            ServiceSource::Fallback => "fallback",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingServices {
    /// Preferred services first, then discovered ones.
    pub services: Vec<String>,
    pub preferred: Vec<String>,
    pub region: String,
    pub source: ServiceSource,
}

#[derive(Clone)]
pub struct StreamingService {
    store: Arc<dyn CacheStore>,
    configured: Vec<String>,
    region: String,
}

impl StreamingService {
    pub fn new(store: Arc<dyn CacheStore>, configured: &[String], region: String) -> Self {
        let configured = configured
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            store,
            configured,
            region,
        }
    }

    pub async fn services(&self) -> StreamingServices {
        match self.discover().await {
            Ok(discovered) => self.merge(discovered),
            Err(e) => {
                tracing::warn!(error = %e, "Streaming service discovery failed");
                self.without_discovery()
            }
        }
    }

    /// Subscription services offered in the region by any cached provider entry, sorted.
    async fn discover(&self) -> Result<Vec<String>, CacheStoreError> {
        let payloads = self.store.payloads(Namespace::Providers).await?;
        let names: BTreeSet<String> = payloads
            .into_iter()
            .filter_map(|payload| serde_json::from_value::<WatchProviders>(payload).ok())
            .flat_map(|providers| providers.flatrate_names(&self.region))
            .collect();
        Ok(names.into_iter().collect())
    }

    fn merge(&self, discovered: Vec<String>) -> StreamingServices {
        if self.configured.is_empty() {
            if discovered.is_empty() {
                tracing::info!(region = %self.region, "No streaming services cached yet");
            }
            return StreamingServices {
                services: discovered,
                preferred: Vec::new(),
                region: self.region.clone(),
                source: ServiceSource::AutoDiscovered,
            };
        }

        let mut services = self.configured.clone();
        for name in discovered {
            if !services.contains(&name) {
                services.push(name);
            }
        }
        tracing::debug!(
            preferred = self.configured.len(),
            discovered = services.len() - self.configured.len(),
            "Streaming services merged"
        );

        StreamingServices {
            services,
            preferred: self.configured.clone(),
            region: self.region.clone(),
            source: ServiceSource::Configured,
        }
    }

    fn without_discovery(&self) -> StreamingServices {
        if self.configured.is_empty() {
            StreamingServices {
                services: FALLBACK_SERVICES.iter().map(|s| s.to_string()).collect(),
                preferred: Vec::new(),
                region: self.region.clone(),
                source: ServiceSource::Fallback,
            }
        } else {
            StreamingServices {
                services: self.configured.clone(),
                preferred: self.configured.clone(),
                region: self.region.clone(),
                source: ServiceSource::Configured,
            }
        }
    }
}
