//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, not_found_handler, request_id_middleware};
use crate::config::settings::ServerConfig;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware (runs first) - generates/propagates request IDs
/// 2. Logging middleware (runs second) - logs requests with request IDs
///
/// # Routes
/// - `/api/watchlist`, `/api/genres`, `/api/streaming-services`
/// - `/api/providers`, `/api/movie-details`
/// - `/api/cache/stats`, `/api/cache/clear`
/// - `/api/debug`
/// - `/health`, `/health/live`, `/health/ready`
/// - `/swagger-ui` with the document at `/api-docs/openapi.json`
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let api_routes = OpenApiRouter::new()
        .merge(handlers::watchlist::watchlist_routes())
        .merge(handlers::movies::movie_routes())
        .merge(handlers::diagnostics::diagnostics_routes())
        .nest("/cache", handlers::cache::cache_routes());

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .fallback(not_found_handler)
        // Middleware is applied in reverse order - last added runs first
        // So logging runs after request_id has set the ID
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout)))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{CacheStatsResponse, ClearCacheResponse, ErrorResponse};
    use crate::cache::{CacheStore, ManualClock, MemoryCacheStore, Namespace};
    use crate::config::settings::{Settings, TmdbConfig};
    use crate::external::TmdbClient;
    use crate::external::build_http_client;
    use crate::external::tmdb::fake::{ScriptedCatalog, movie};
    use crate::models::{Genre, MovieDetails, WatchProviders};
    use crate::services::Services;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        catalog: Arc<ScriptedCatalog>,
        store: Arc<MemoryCacheStore>,
    }

    fn scripted_catalog() -> ScriptedCatalog {
        let providers: WatchProviders = serde_json::from_value(json!({
            "US": {"flatrate": [{"provider_name": "Netflix"}]}
        }))
        .unwrap();
        ScriptedCatalog {
            providers: HashMap::from([(278, providers)]),
            details: HashMap::from([
                (278, MovieDetails { runtime: Some(142) }),
                (238, MovieDetails { runtime: Some(175) }),
            ]),
            genres: vec![
                Genre {
                    id: 18,
                    name: "Drama".to_string(),
                },
                Genre {
                    id: 80,
                    name: "Crime".to_string(),
                },
            ],
            ..ScriptedCatalog::with_pages(vec![
                vec![movie(278, "The Shawshank Redemption", &[18, 80])],
                vec![movie(238, "The Godfather", &[18, 80])],
            ])
        }
    }

    fn test_app() -> TestApp {
        test_app_with(|_| {})
    }

    fn test_app_with(configure: impl FnOnce(&mut Settings)) -> TestApp {
        let mut settings = Settings::default();
        settings.tmdb.account_id = "acct".to_string();
        settings.tmdb.base_url = "http://127.0.0.1:9".to_string();
        configure(&mut settings);

        let catalog = Arc::new(scripted_catalog());
        let store = Arc::new(MemoryCacheStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
        ));
        let client = TmdbClient::new(
            build_http_client(Duration::from_secs(1)).unwrap(),
            &TmdbConfig {
                base_url: settings.tmdb.base_url.clone(),
                ..Default::default()
            },
        );

        let services = Services::new(&settings, store.clone(), catalog.clone(), client, clock);
        TestApp {
            router: create_router(AppState::new(services), &settings.server),
            catalog,
            store,
        }
    }

    async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
        send(router, Method::GET, uri).await
    }

    #[tokio::test]
    async fn test_watchlist_aggregates_pages_with_genres() {
        let app = test_app();
        let (status, body) = get(&app.router, "/api/watchlist").await;

        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "The Shawshank Redemption");
        assert_eq!(items[0]["genres"], json!(["Drama", "Crime"]));
        assert_eq!(items[1]["providers"], json!({}));
        assert_eq!(app.catalog.pages_requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_providers_keyed_by_id_with_placeholder() {
        let app = test_app();
        let (status, body) = get(&app.router, "/api/providers?ids=278,999").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["278"]["US"]["flatrate"][0]["provider_name"], "Netflix");
        assert_eq!(body["999"], json!({}));
    }

    #[tokio::test]
    async fn test_movie_details_second_call_served_from_cache() {
        let app = test_app();
        let (_, first) = get(&app.router, "/api/movie-details?ids=278,238,278").await;
        let (_, second) = get(&app.router, "/api/movie-details?ids=238,278").await;

        assert_eq!(first, json!({"238": {"runtime": 175}, "278": {"runtime": 142}}));
        assert_eq!(first, second);
        assert_eq!(app.catalog.detail_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_ids_rejected() {
        let app = test_app();
        for uri in ["/api/providers", "/api/providers?ids=", "/api/movie-details?ids=,,"] {
            let (status, body) = get(&app.router, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            let error: ErrorResponse = serde_json::from_value(body).unwrap();
            assert_eq!(error.message, "No movie IDs provided");
            assert!(error.request_id.is_some());
        }
    }

    #[tokio::test]
    async fn test_malformed_ids_rejected() {
        let app = test_app();
        let (status, body) = get(&app.router, "/api/movie-details?ids=1,abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid movie IDs");
        assert_eq!(app.catalog.detail_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_genres_listed_in_catalog_order() {
        let app = test_app();
        let (status, body) = get(&app.router, "/api/genres").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"id": 18, "name": "Drama"}, {"id": 80, "name": "Crime"}])
        );
    }

    #[tokio::test]
    async fn test_clear_then_stats_and_refetch() {
        let app = test_app();
        get(&app.router, "/api/watchlist").await;
        get(&app.router, "/api/providers?ids=278").await;

        let (status, body) = get(&app.router, "/api/cache/stats").await;
        assert_eq!(status, StatusCode::OK);
        let stats: CacheStatsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(stats.backend, "memory");
        assert_eq!(stats.watchlist.cached_entries, 1);
        assert_eq!(stats.watchlist.cache_duration_hours, 6);
        assert_eq!(stats.providers.cached_entries, 1);

        let (status, body) = send(&app.router, Method::POST, "/api/cache/clear").await;
        assert_eq!(status, StatusCode::OK);
        let cleared: ClearCacheResponse = serde_json::from_value(body).unwrap();
        assert_eq!(cleared.rows_deleted, 2);
        assert_eq!(
            app.store.count_and_latest(Namespace::Providers).await.unwrap().count,
            0
        );

        get(&app.router, "/api/providers?ids=278").await;
        assert_eq!(app.catalog.provider_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_also_accepts_get() {
        let app = test_app();
        let (status, body) = get(&app.router, "/api/cache/clear").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_streaming_services_discovered_from_cache() {
        let app = test_app();
        get(&app.router, "/api/providers?ids=278").await;

        let (status, body) = get(&app.router, "/api/streaming-services").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["services"], json!(["Netflix"]));
        assert_eq!(body["source"], "auto-discovered");
        assert_eq!(body["region"], "US");
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = test_app();
        let (status, body) = get(&app.router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["cache_store"]["status"], "healthy");
        assert_eq!(body["checks"]["catalog"]["message"], "API key not configured");

        assert_eq!(get(&app.router, "/health/live").await.0, StatusCode::OK);
        assert_eq!(get(&app.router, "/health/ready").await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_with_credentials_is_healthy() {
        let app = test_app_with(|settings| settings.tmdb.api_key = "test-key".to_string());
        let (status, body) = get(&app.router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"]["catalog"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_routes() {
        let app = test_app();
        let (status, body) = get(&app.router, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let paths = body["paths"].as_object().unwrap();
        for path in [
            "/api/watchlist",
            "/api/providers",
            "/api/movie-details",
            "/api/cache/clear",
            "/health/ready",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = test_app();
        let (status, body) = get(&app.router, "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
