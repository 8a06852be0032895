use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use review_portal_core::workflow::ValidationError;
use review_portal_core::{ReviewError, StoreError};

/// API error type that maps to `{"error": {"type", "message", "statusCode"}}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// The record store failed. `message` is what the client sees; the
    /// store's own status and body are only logged.
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Map a workflow failure, using `message` as the client-facing text
    /// for store failures.
    pub fn review(message: &'static str) -> impl Fn(ReviewError) -> ApiError {
        move |err| match err {
            ReviewError::Validation(e) => ApiError::from(e),
            ReviewError::Store(source) => ApiError::Store { message, source },
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::Store { message, source } => {
                tracing::error!(store_status = ?source.status(), "{message}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    message.to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
