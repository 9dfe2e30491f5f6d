// ABOUTME: Handler-boundary error type
// ABOUTME: Every failure becomes a 500 response carrying the raw error message

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::uploads::UploadError;
use postboard_storage::StorageError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("{0}")]
    Multipart(#[from] MultipartError),

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        error!(error = %message, "Request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { message }),
        )
            .into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
