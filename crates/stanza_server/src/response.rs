//! Error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stanza_error::{StorageError, StorageErrorKind};
use tracing::error;

/// Error returned from a handler, rendered as `{"detail": ...}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        let (status, detail) = match err.kind() {
            StorageErrorKind::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            StorageErrorKind::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => {
                error!(error = %err, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };
        Self { status, detail }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
