//! # API Errors
//!
//! Every failure leaves the server as the same JSON shape:
//! `{result: false, error_type, error_message, code}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::service::ServiceError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned for every server-side failure
const INTERNAL_MESSAGE: &str = "internal server error";

/// Handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure reported by the service layer
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Neither `api-key` nor `Authorization: Bearer` was sent
    #[error("Missing API key")]
    MissingApiKey,

    /// Body could not be parsed as JSON or multipart
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path parameter is not a valid id
    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    /// The blocking task running the service call panicked or was cancelled
    #[error("Service task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::MissingApiKey => StatusCode::UNAUTHORIZED,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Service(err) => err.error_type(),
            ApiError::MissingApiKey => "Unauthenticated",
            ApiError::InvalidBody(_) | ApiError::InvalidPath(_) => "BadRequest",
            ApiError::Worker(_) => "Internal",
        }
    }

    /// Whether the caller is at fault. Drives the log level.
    pub fn is_client_error(&self) -> bool {
        match self {
            ApiError::Service(err) => err.is_client_error(),
            ApiError::Worker(_) => false,
            ApiError::MissingApiKey | ApiError::InvalidBody(_) | ApiError::InvalidPath(_) => true,
        }
    }

    /// Message safe to show to clients. Server-side causes stay in the log.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub result: bool,
    pub error_type: String,
    pub error_message: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            result: false,
            error_type: err.error_type().to_string(),
            error_message: err.public_message(),
            code: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_client_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        } else {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
