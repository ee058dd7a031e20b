//! Error handler for converting AppError to HTTP responses.
//!
//! Only `Validation` and `BadRequest` carry their message to the client.
//! Upstream and store failures are logged in full and answered with a
//! sanitized message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// # Status Code Mapping
    /// - Validation → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - Upstream → 502 BAD_GATEWAY
    /// - CacheStore → 500 INTERNAL_SERVER_ERROR
    /// - Configuration → 500 INTERNAL_SERVER_ERROR
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    ///
    /// The `ErrorResponse` is also stored in the response extensions so the
    /// request-id middleware can stamp it.
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        let body = error_to_response_body(&self);
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

fn error_to_response_body(error: &AppError) -> ErrorResponse {
    let code = error_to_code(error);
    match error {
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::BadRequest { message } => ErrorResponse::new(code, message),
        AppError::Upstream { operation, source } => {
            let mut details = json!({ "operation": operation });
            if let Some(status) = source.status() {
                details["upstream_status"] = json!(status.as_u16());
            }
            ErrorResponse::new(code, "Catalog request failed").with_details(details)
        }
        AppError::CacheStore { operation, .. } => ErrorResponse::new(
            code,
            &format!("Cache store operation failed: {}", operation),
        )
        .with_details(json!({ "operation": operation })),
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, &format!("Configuration error: {}", key))
                .with_details(json!({ "key": key }))
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        AppError::CacheStore { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Upstream { .. } => "UPSTREAM_ERROR",
        AppError::CacheStore { .. } => "CACHE_STORE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// JSON 404 for unmatched routes.
pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            "NOT_FOUND",
            "The requested resource was not found",
        )),
    )
        .into_response()
}
