//! Scripted in-process catalog for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{CatalogSource, Page};
use crate::external::UpstreamError;
use crate::models::{Genre, MovieDetails, MovieId, MovieSummary, WatchProviders};

/// Serves canned responses and records every call it receives.
///
/// Ids missing from `providers`/`details` answer with a 404 status error.
#[derive(Default)]
pub struct ScriptedCatalog {
    pub watchlist_pages: Vec<Vec<MovieSummary>>,
    pub failing_page: Option<u32>,
    pub providers: HashMap<MovieId, WatchProviders>,
    pub details: HashMap<MovieId, MovieDetails>,
    pub genres: Vec<Genre>,
    pub fail_genres: AtomicBool,
    pub page_calls: Mutex<Vec<u32>>,
    pub provider_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub genre_calls: AtomicUsize,
}

impl ScriptedCatalog {
    pub fn with_pages(pages: Vec<Vec<MovieSummary>>) -> Self {
        Self {
            watchlist_pages: pages,
            ..Default::default()
        }
    }

    pub fn pages_requested(&self) -> Vec<u32> {
        self.page_calls.lock().unwrap().clone()
    }

    fn not_found(path: String) -> UpstreamError {
        UpstreamError::Status {
            path,
            status: StatusCode::NOT_FOUND,
            body: r#"{"status_code":34}"#.to_string(),
        }
    }
}

pub fn movie(id: MovieId, title: &str, genre_ids: &[i64]) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        release_date: String::new(),
        vote_average: 0.0,
        genre_ids: genre_ids.to_vec(),
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    async fn watchlist_page(
        &self,
        account_id: &str,
        page: u32,
    ) -> Result<Page<MovieSummary>, UpstreamError> {
        self.page_calls.lock().unwrap().push(page);
        let path = format!("/account/{}/watchlist/movies", account_id);
        if self.failing_page == Some(page) {
            return Err(UpstreamError::Status {
                path,
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "try later".to_string(),
            });
        }

        let total_pages = self.watchlist_pages.len().max(1) as u32;
        let results = self
            .watchlist_pages
            .get(page as usize - 1)
            .cloned()
            .ok_or_else(|| Self::not_found(path))?;
        let total_results = self.watchlist_pages.iter().map(Vec::len).sum::<usize>() as u64;

        Ok(Page {
            page,
            results,
            total_pages,
            total_results,
        })
    }

    async fn watch_providers(&self, movie_id: MovieId) -> Result<WatchProviders, UpstreamError> {
        self.provider_calls.fetch_add(1, Ordering::SeqCst);
        self.providers
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("/movie/{}/watch/providers", movie_id)))
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails, UpstreamError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(&movie_id)
            .copied()
            .ok_or_else(|| Self::not_found(format!("/movie/{}", movie_id)))
    }

    async fn genres(&self) -> Result<Vec<Genre>, UpstreamError> {
        self.genre_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_genres.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status {
                path: "/genre/movie/list".to_string(),
                status: StatusCode::UNAUTHORIZED,
                body: "Invalid API key".to_string(),
            });
        }
        Ok(self.genres.clone())
    }
}
