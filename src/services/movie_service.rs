use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{BatchReconciler, Category, Namespace, TtlPolicy};
use crate::external::CatalogSource;
use crate::models::{MovieDetails, MovieId, WatchProviders};

/// Per-movie metadata served through the batch reconciler.
///
/// Providers and details share the metadata TTL.
#[derive(Clone)]
pub struct MovieService {
    reconciler: BatchReconciler,
    catalog: Arc<dyn CatalogSource>,
    ttl: TtlPolicy,
}

impl MovieService {
    pub fn new(reconciler: BatchReconciler, catalog: Arc<dyn CatalogSource>, ttl: TtlPolicy) -> Self {
        Self {
            reconciler,
            catalog,
            ttl,
        }
    }

    pub async fn providers(&self, ids: &[MovieId]) -> HashMap<MovieId, WatchProviders> {
        let catalog = Arc::clone(&self.catalog);
        self.reconciler
            .reconcile(
                Namespace::Providers,
                self.ttl.ttl_hours(Category::Metadata),
                ids,
                move |id| {
                    let catalog = Arc::clone(&catalog);
                    async move { catalog.watch_providers(id).await }
                },
            )
            .await
    }

    pub async fn details(&self, ids: &[MovieId]) -> HashMap<MovieId, MovieDetails> {
        let catalog = Arc::clone(&self.catalog);
        self.reconciler
            .reconcile(
                Namespace::Details,
                self.ttl.ttl_hours(Category::Metadata),
                ids,
                move |id| {
                    let catalog = Arc::clone(&catalog);
                    async move { catalog.movie_details(id).await }
                },
            )
            .await
    }
}
