use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-path error taxonomy. Validation failures are client errors and are
/// never logged as server faults; store failures are logged and mapped to 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid campaign type")]
    InvalidType,

    #[error("Campaign not found")]
    NotFound,

    #[error("Failed to insert campaign")]
    Persistence,

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFields | ApiError::InvalidType => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Persistence => {
                error!("Campaign insert affected zero rows");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Store(e) => {
                error!(error = %e, "Store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
