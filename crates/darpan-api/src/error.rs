//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! The response body keeps the wire contract the dashboard clients already
//! consume — a flat `{"status":"error","message":…}` envelope — while the
//! mapping from domain failures to HTTP status codes stays structured.
//! Internal error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error envelope returned for every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Always `"error"`.
    pub status: String,
    /// Human-readable failure description.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested region does not exist in the dataset (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Backing data artifacts are not loaded (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::NotFound(msg) | Self::ServiceUnavailable(msg) => msg.clone(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            Self::NotFound(_) => {}
        }

        let body = ErrorBody {
            status: "error".to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
