use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use super::CatalogSource;
use super::types::{GenreList, Page, ProvidersResponse};
use crate::config::{AuthMethod, TmdbConfig};
use crate::external::UpstreamError;
use crate::models::{Genre, MovieDetails, MovieId, MovieSummary, WatchProviders};

/// Error bodies are truncated to this many characters before they are kept.
const MAX_ERROR_BODY: usize = 512;

/// Thin HTTP client for the TMDb v3 API.
///
/// Authentication is applied to every request: either the credential goes in
/// the `api_key` query parameter or it is sent as a bearer token.
#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    auth_method: AuthMethod,
}

impl TmdbClient {
    pub fn new(http: reqwest::Client, config: &TmdbConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            auth_method: config.auth_method,
        }
    }

    pub fn auth_method(&self) -> AuthMethod {
        self.auth_method
    }

    /// GET a single resource and decode it as `T`.
    pub async fn fetch_item<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        self.get_json(path, &[]).await
    }

    /// GET one page of a paginated listing. `page` is 1-based.
    pub async fn fetch_list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        params: &[(&str, &str)],
    ) -> Result<Page<T>, UpstreamError> {
        let page = page.to_string();
        let mut query = Vec::with_capacity(params.len() + 1);
        query.push(("page", page.as_str()));
        query.extend_from_slice(params);
        self.get_json(path, &query).await
    }

    /// GET `path` and return the raw status and body without judging either.
    ///
    /// Used by the diagnostics endpoint, which reports failures instead of
    /// propagating them.
    pub async fn get_raw(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<(StatusCode, String), UpstreamError> {
        let url = self.request_url(path, params)?;
        let response = self.authorized(url).send().await.map_err(|source| {
            UpstreamError::Transport {
                path: path.to_string(),
                source,
            }
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| UpstreamError::Transport {
            path: path.to_string(),
            source,
        })?;
        Ok((status, body))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let (status, body) = self.get_raw(path, params).await?;
        tracing::debug!(path, status = status.as_u16(), "Catalog response");

        if !status.is_success() {
            return Err(UpstreamError::Status {
                path: path.to_string(),
                status,
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|source| UpstreamError::Decode {
            path: path.to_string(),
            source,
        })
    }

    fn request_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, UpstreamError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            UpstreamError::InvalidUrl {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;

        let with_key = self.auth_method == AuthMethod::ApiKey;
        if with_key || !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            if with_key {
                pairs.append_pair("api_key", &self.api_key);
            }
        }

        Ok(url)
    }

    fn authorized(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.http.get(url).header(ACCEPT, "application/json");
        match self.auth_method {
            AuthMethod::Bearer => request.bearer_auth(&self.api_key),
            AuthMethod::ApiKey => request,
        }
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    async fn watchlist_page(
        &self,
        account_id: &str,
        page: u32,
    ) -> Result<Page<MovieSummary>, UpstreamError> {
        let path = format!("/account/{}/watchlist/movies", account_id);
        self.fetch_list_page(&path, page, &[("sort_by", "created_at.desc")])
            .await
    }

    async fn watch_providers(&self, movie_id: MovieId) -> Result<WatchProviders, UpstreamError> {
        let path = format!("/movie/{}/watch/providers", movie_id);
        let body: ProvidersResponse = self.fetch_item(&path).await?;
        Ok(body.results)
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails, UpstreamError> {
        self.fetch_item(&format!("/movie/{}", movie_id)).await
    }

    async fn genres(&self) -> Result<Vec<Genre>, UpstreamError> {
        let body: GenreList = self.fetch_item("/genre/movie/list").await?;
        Ok(body.genres)
    }
}
