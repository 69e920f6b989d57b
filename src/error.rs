//! Error types for the shoe API
//!
//! Provides unified error handling using thiserror.

use serde_json::json;
use thiserror::Error;

use crate::models::ApiResponse;

// == Store Error Enum ==
/// Failure reported by a store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rejected the request itself (bad document path, key update, missing key)
    #[error("Store validation failed: {0}")]
    Validation(String),

    /// The store call failed (network, permissions, throttling, ...)
    #[error("Store operation '{operation}' failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// A stored attribute could not be represented as JSON
    #[error("Store payload conversion failed: {0}")]
    Serialization(String),
}

// == Api Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No entry in the routing table matched
    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// Missing or malformed request input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Response payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status code this failure is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::RouteNotFound { .. } => 404,
            ApiError::InvalidRequest(_) => 400,
            ApiError::Store(StoreError::Validation(_)) => 400,
            ApiError::Store(_) => 500,
            ApiError::Serialization(_) => 500,
        }
    }

    /// Returns true for failures caused by the caller.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    // == Into Api Response ==
    /// Converts the error into a concrete `{"error": ...}` response.
    pub fn into_response(self) -> ApiResponse {
        ApiResponse::build(
            self.status_code(),
            Some(json!({
                "error": self.to_string()
            })),
        )
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handling.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Convenience Result type for store backends.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
