//! # Service Errors
//!
//! Error taxonomy for the social operations.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Social operation errors
#[derive(Debug, Error)]
pub enum ServiceError {
    // ==================
    // Client Errors
    // ==================
    /// API key missing or unknown
    #[error("Invalid API key")]
    Unauthenticated,

    /// Tweet, user or media absent, or a tweet owned by someone else
    #[error("{0} not found")]
    NotFound(String),

    /// Duplicate like/follow, or nothing to unlike
    #[error("{0}")]
    Conflict(String),

    /// Request that can never succeed, e.g. following yourself
    #[error("{0}")]
    BadRequest(String),

    // ==================
    // Internal Errors
    // ==================
    /// Store failure; the cause is logged, never returned to clients
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ServiceError::NotFound(what.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict(message.into())
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Unauthenticated => 401,
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::Storage(_) => 500,
        }
    }

    /// Short machine-readable kind, used as `error_type` in responses
    pub fn error_type(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "BadRequest",
            ServiceError::Unauthenticated => "Unauthenticated",
            ServiceError::NotFound(_) => "NotFound",
            ServiceError::Conflict(_) => "Conflict",
            ServiceError::Storage(_) => "Internal",
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
