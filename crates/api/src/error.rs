//! API Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Request handling errors, mapped onto the wire contract
#[derive(Debug, Error)]
pub enum ApiError {
    /// One of the required measurements was absent or null
    #[error("missing required fields")]
    MissingFields,

    /// Storage failed while reading
    #[error("fetch failed: {0}")]
    Fetch(#[source] StorageError),

    /// Storage failed while writing
    #[error("save failed: {0}")]
    Save(#[source] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingFields => (StatusCode::BAD_REQUEST, "Missing required fields"),
            ApiError::Fetch(cause) => {
                error!("Database error: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch sensor data")
            }
            ApiError::Save(cause) => {
                error!("Database error: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save data")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
