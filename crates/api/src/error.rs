//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::FunnelError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Funnel dispatch error.
    Funnel(FunnelError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Funnel(err) => funnel_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn funnel_error_to_response(err: FunnelError) -> (StatusCode, String) {
    match &err {
        FunnelError::SessionNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        FunnelError::StepIncomplete { .. } => (StatusCode::CONFLICT, err.to_string()),
        FunnelError::SessionNotStarted => (StatusCode::BAD_REQUEST, err.to_string()),
        FunnelError::Store(_) | FunnelError::Serialization(_) => {
            tracing::error!(error = %err, "funnel dispatch failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<FunnelError> for ApiError {
    fn from(err: FunnelError) -> Self {
        ApiError::Funnel(err)
    }
}
