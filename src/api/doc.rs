use utoipa::OpenApi;

pub const WATCHLIST_TAG: &str = "Watchlist";
pub const MOVIES_TAG: &str = "Movies";
pub const CACHE_TAG: &str = "Cache";
pub const DIAGNOSTICS_TAG: &str = "Diagnostics";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flickstream",
        description = "Movie watchlist with cached streaming providers and runtimes",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::cache::Namespace,
        )
    ),
    tags(
        (name = WATCHLIST_TAG, description = "Watchlist and genre endpoints"),
        (name = MOVIES_TAG, description = "Per-movie providers and runtimes"),
        (name = CACHE_TAG, description = "Cache statistics and bulk clear"),
        (name = DIAGNOSTICS_TAG, description = "Configuration and catalog connectivity checks"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
