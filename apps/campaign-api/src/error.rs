//! Error types for the campaign server

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tower_governor::GovernorError;

/// Request-level failures; per-lead failures never surface here
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file provided")]
    MissingFile,

    #[error("Not a CSV file: {0}")]
    NotCsv(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Missing required data")]
    MissingData,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::MissingFile => (
                StatusCode::BAD_REQUEST,
                "NO_FILE",
                "No file provided".to_string(),
            ),
            ApiError::NotCsv(name) => {
                tracing::debug!("Rejected upload {}", name);
                (
                    StatusCode::BAD_REQUEST,
                    "NOT_CSV",
                    "Please upload a CSV file".to_string(),
                )
            }
            ApiError::Upload(detail) => {
                tracing::error!("Upload error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPLOAD_FAILED",
                    "Failed to process file".to_string(),
                )
            }
            ApiError::MissingData => (
                StatusCode::BAD_REQUEST,
                "MISSING_DATA",
                "Missing required data".to_string(),
            ),
            ApiError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Request body too large".to_string(),
            ),
            ApiError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            ApiError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT_EXCEEDED",
                "Too many requests, please slow down".to_string(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Upload(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
            _ => ApiError::Upload(err.body_text()),
        }
    }
}

/// Body rejections keep their 413 and 415 statuses; anything the JSON
/// parser refuses is a 400
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
            StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                ApiError::UnsupportedMediaType(rejection.body_text())
            }
            _ => ApiError::InvalidRequest(rejection.body_text()),
        }
    }
}

/// Rate limiter refusals in the usual JSON envelope
///
/// The limiter's own headers (`retry-after`, `x-ratelimit-*`) are kept.
pub fn governor_error(err: GovernorError) -> Response {
    match err {
        GovernorError::TooManyRequests { headers, .. } => {
            let mut response = ApiError::RateLimitExceeded.into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        other => ApiError::Internal(other.to_string()).into_response(),
    }
}
