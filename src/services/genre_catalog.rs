//! Lazily loaded genre table shared by every request.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::external::CatalogSource;
use crate::models::Genre;

/// Genre table as delivered by the catalog.
#[derive(Debug, Default, PartialEq)]
pub struct GenreTable {
    /// Catalog order.
    pub genres: Vec<Genre>,
    pub names: HashMap<i64, String>,
}

impl GenreTable {
    fn new(genres: Vec<Genre>) -> Self {
        let names = genres.iter().map(|g| (g.id, g.name.clone())).collect();
        Self { genres, names }
    }
}

/// Single-entry cache of the catalog's genre list.
///
/// The first `get` fetches the table and later calls reuse it until
/// `invalidate` or `refresh`. A failed fetch is served as an empty table and
/// is not remembered, so the next call tries again.
#[derive(Clone)]
pub struct GenreCatalog {
    catalog: Arc<dyn CatalogSource>,
    table: Arc<RwLock<Option<Arc<GenreTable>>>>,
}

impl GenreCatalog {
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            table: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn get(&self) -> Arc<GenreTable> {
        if let Some(table) = self.table.read().await.as_ref() {
            return Arc::clone(table);
        }

        let mut slot = self.table.write().await;
        // Another request may have loaded it while we waited for the lock.
        if let Some(table) = slot.as_ref() {
            return Arc::clone(table);
        }

        match self.fetch().await {
            Some(table) => {
                *slot = Some(Arc::clone(&table));
                table
            }
            None => Arc::new(GenreTable::default()),
        }
    }

    /// Drop the loaded table; the next `get` fetches it again.
    pub async fn invalidate(&self) {
        self.table.write().await.take();
    }

    /// Fetch the table now. On failure the previously loaded table, if any,
    /// stays in place and is returned.
    pub async fn refresh(&self) -> Arc<GenreTable> {
        let mut slot = self.table.write().await;
        match self.fetch().await {
            Some(table) => {
                *slot = Some(Arc::clone(&table));
                table
            }
            None => slot.clone().unwrap_or_default(),
        }
    }

    pub async fn is_loaded(&self) -> bool {
        self.table.read().await.is_some()
    }

    async fn fetch(&self) -> Option<Arc<GenreTable>> {
        match self.catalog.genres().await {
            Ok(genres) => {
                tracing::info!(count = genres.len(), "Genre table loaded");
                Some(Arc::new(GenreTable::new(genres)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Genre table unavailable");
                None
            }
        }
    }
}
