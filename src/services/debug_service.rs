//! Configuration summary and live catalog checks for troubleshooting.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::TmdbConfig;
use crate::external::TmdbClient;
use crate::external::tmdb::Page;

/// Catalog settings as reported by `/api/debug`. The credential itself is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfigSummary {
    pub tmdb_api_key_set: bool,
    pub tmdb_api_key_length: usize,
    pub tmdb_account_id: String,
    pub tmdb_account_id_set: bool,
    pub auth_method: String,
}

/// Outcome of one live request against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EndpointCheck {
    /// HTTP status, absent when no response arrived
    pub status: Option<u16>,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies_on_first_page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EndpointChecks {
    pub genres_api: EndpointCheck,
    pub watchlist_api: EndpointCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DebugReport {
    pub config: ConfigSummary,
    pub tests: EndpointChecks,
}

#[derive(Clone)]
pub struct DebugService {
    client: TmdbClient,
    config: TmdbConfig,
}

impl DebugService {
    pub fn new(client: TmdbClient, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    pub fn config_summary(&self) -> ConfigSummary {
        ConfigSummary {
            tmdb_api_key_set: !self.config.api_key.is_empty(),
            tmdb_api_key_length: self.config.api_key.chars().count(),
            tmdb_account_id: self.config.account_id.clone(),
            tmdb_account_id_set: !self.config.account_id.is_empty(),
            auth_method: self.config.auth_method.to_string(),
        }
    }

    /// Request the genre list (credential check) and the first watchlist page
    /// (account check). Failures are reported, never returned as errors.
    pub async fn report(&self) -> DebugReport {
        let (genres_api, watchlist_api) = tokio::join!(self.check_genres(), self.check_watchlist());
        DebugReport {
            config: self.config_summary(),
            tests: EndpointChecks {
                genres_api,
                watchlist_api,
            },
        }
    }

    async fn check_genres(&self) -> EndpointCheck {
        match self.client.get_raw("/genre/movie/list", &[]).await {
            Ok((status, body)) => {
                let success = status.is_success();
                EndpointCheck {
                    status: Some(status.as_u16()),
                    success,
                    message: if success {
                        "API key is valid".to_string()
                    } else {
                        format!("API key issue: {}", body)
                    },
                    total_results: None,
                    total_pages: None,
                    movies_on_first_page: None,
                }
            }
            Err(e) => Self::unreachable(e.to_string()),
        }
    }

    async fn check_watchlist(&self) -> EndpointCheck {
        let path = format!("/account/{}/watchlist/movies", self.config.account_id);
        match self.client.get_raw(&path, &[("page", "1")]).await {
            Ok((status, body)) if status.is_success() => {
                let page = serde_json::from_str::<Page<serde_json::Value>>(&body).ok();
                EndpointCheck {
                    status: Some(status.as_u16()),
                    success: true,
                    message: "Watchlist accessible".to_string(),
                    total_results: Some(page.as_ref().map_or(0, |p| p.total_results)),
                    total_pages: Some(page.as_ref().map_or(0, |p| p.total_pages)),
                    movies_on_first_page: Some(page.as_ref().map_or(0, |p| p.results.len())),
                }
            }
            Ok((status, body)) => EndpointCheck {
                status: Some(status.as_u16()),
                success: false,
                message: format!("Watchlist error: {}", body),
                total_results: Some(0),
                total_pages: Some(0),
                movies_on_first_page: Some(0),
            },
            Err(e) => Self::unreachable(e.to_string()),
        }
    }

    fn unreachable(message: String) -> EndpointCheck {
        EndpointCheck {
            status: None,
            success: false,
            message,
            total_results: None,
            total_pages: None,
            movies_on_first_page: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthMethod;
    use crate::external::build_http_client;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(base_url: String) -> DebugService {
        let config = TmdbConfig {
            base_url,
            api_key: "0123456789".to_string(),
            account_id: "77".to_string(),
            auth_method: AuthMethod::Bearer,
            ..Default::default()
        };
        let client = TmdbClient::new(build_http_client(Duration::from_secs(2)).unwrap(), &config);
        DebugService::new(client, config)
    }

    #[test]
    fn test_summary_hides_key() {
        let summary = service("http://localhost".to_string()).config_summary();
        assert!(summary.tmdb_api_key_set);
        assert_eq!(summary.tmdb_api_key_length, 10);
        assert_eq!(summary.auth_method, "bearer");
        let rendered = serde_json::to_string(&summary).unwrap();
        assert!(!rendered.contains("0123456789"));
    }

    #[tokio::test]
    async fn test_report_checks_both_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/genre/movie/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"genres": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/account/77/watchlist/movies"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "results": [{"id": 1}, {"id": 2}],
                "total_pages": 4,
                "total_results": 70
            })))
            .mount(&server)
            .await;

        let report = service(server.uri()).report().await;

        assert!(report.tests.genres_api.success);
        assert_eq!(report.tests.genres_api.status, Some(200));
        assert_eq!(report.tests.watchlist_api.total_results, Some(70));
        assert_eq!(report.tests.watchlist_api.total_pages, Some(4));
        assert_eq!(report.tests.watchlist_api.movies_on_first_page, Some(2));
    }

    #[tokio::test]
    async fn test_report_surfaces_upstream_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let report = service(server.uri()).report().await;

        assert!(!report.tests.genres_api.success);
        assert_eq!(report.tests.genres_api.status, Some(401));
        assert!(report.tests.genres_api.message.contains("Invalid API key"));
        assert!(report.tests.watchlist_api.message.starts_with("Watchlist error"));
    }

    #[tokio::test]
    async fn test_report_unreachable_catalog() {
        let report = service("http://127.0.0.1:9".to_string()).report().await;
        assert_eq!(report.tests.genres_api.status, None);
        assert!(!report.tests.genres_api.success);
    }
}
