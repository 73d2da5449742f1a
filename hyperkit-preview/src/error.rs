//! HTTP-facing error type.
//!
//! Every failure leaves the server as a JSON body `{"error": "..."}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::resolver::ResolveError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input (400).
    #[error("{0}")]
    Validation(String),
    /// Unknown project or file (404).
    #[error("{0}")]
    NotFound(String),
    /// Anything unexpected, including handler panics (500). The detail is
    /// logged; the caller gets `{"error", "success": false}`.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        ApiError::NotFound(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                json!({ "error": "Internal server error", "success": false })
            }
            ApiError::Validation(m) | ApiError::NotFound(m) => json!({ "error": m }),
        };
        (status, Json(body)).into_response()
    }
}
