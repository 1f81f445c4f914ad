//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Shown to the user when a selection cannot be resolved
pub const RETRY_MESSAGE: &str = "Something went wrong, couldn't find those albums, try again";

/// Errors that end a comparison request
#[derive(Debug)]
pub enum ApiError {
    /// Unknown display name or album without metadata
    NotFound(String),
    /// Data could not be loaded or another internal failure
    Internal(String),
}

impl From<battle_common::Error> for ApiError {
    fn from(err: battle_common::Error) -> Self {
        match err {
            battle_common::Error::NotFound(what) => ApiError::NotFound(what),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            ApiError::NotFound(what) => {
                warn!("Comparison lookup failed: {}", what);
                (StatusCode::NOT_FOUND, RETRY_MESSAGE, format!("Not found: {}", what))
            }
            ApiError::Internal(msg) => {
                error!("Comparison failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while loading the album data",
                    msg,
                )
            }
        };

        let body = Json(json!({
            "error": detail,
            "message": message,
        }));

        (status, body).into_response()
    }
}
