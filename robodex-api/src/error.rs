//! Error Types for the Robodex API
//!
//! This module defines error handling for the HTTP layer:
//! - ErrorCode enum for categorizing errors
//! - ApiError struct serialized as the JSON error body
//! - IntoResponse implementation for Axum HTTP responses
//!
//! Every error reaches the client as `{"error": <message>, "code": <CODE>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use robodex_core::{RobotError, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Required form field or file list is missing
    MissingField,

    /// Uploaded file is not an image
    InvalidFormat,

    /// Request could not be parsed (bad multipart body, bad config value)
    InvalidInput,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Index does not address an existing robot
    InvalidIndex,

    /// No route or static file matches the request
    NotFound,

    // ========================================================================
    // Server Errors (500)
    // ========================================================================
    /// Record file or upload directory could not be read or written
    StorageError,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::MissingField | ErrorCode::InvalidFormat | ErrorCode::InvalidInput => {
                StatusCode::BAD_REQUEST
            }

            ErrorCode::InvalidIndex | ErrorCode::NotFound => StatusCode::NOT_FOUND,

            ErrorCode::StorageError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::MissingField => "Missing fields",
            ErrorCode::InvalidFormat => "Invalid file format",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::InvalidIndex => "Invalid index",
            ErrorCode::NotFound => "Not found",
            ErrorCode::StorageError => "Storage operation failed",
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    #[serde(rename = "error")]
    pub message: String,

    /// Error code categorizing the error
    pub code: ErrorCode,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    pub fn missing_fields() -> Self {
        Self::from_code(ErrorCode::MissingField)
    }

    pub fn invalid_file_format() -> Self {
        Self::from_code(ErrorCode::InvalidFormat)
    }

    pub fn invalid_index() -> Self {
        Self::from_code(ErrorCode::InvalidIndex)
    }

    pub fn not_found() -> Self {
        Self::from_code(ErrorCode::NotFound)
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError so handlers can return it directly.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM DOMAIN ERRORS
// ============================================================================

impl From<RobotError> for ApiError {
    fn from(err: RobotError) -> Self {
        match err {
            RobotError::MissingFields => ApiError::missing_fields(),
            RobotError::InvalidFileFormat { file_name } => {
                tracing::debug!(%file_name, "Rejected non-image upload");
                ApiError::invalid_file_format()
            }
            RobotError::InvalidIndex { index, len } => {
                tracing::debug!(index, len, "Index out of range");
                ApiError::invalid_index()
            }
            RobotError::Storage(err) => err.into(),
        }
    }
}

/// Storage failures are logged in full and reported with a generic message.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage error: {}", err);
        ApiError::from_code(ErrorCode::StorageError)
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::MissingField.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidFormat.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidIndex.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::StorageError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_uses_error_field() {
        let json = serde_json::to_value(ApiError::missing_fields()).unwrap();
        assert_eq!(json["error"], "Missing fields");
        assert_eq!(json["code"], "MISSING_FIELD");
    }

    #[test]
    fn test_robot_error_conversion() {
        let err: ApiError = RobotError::InvalidIndex { index: 7, len: 2 }.into();
        assert_eq!(err, ApiError::invalid_index());
        assert_eq!(err.message, "Invalid index");

        let err: ApiError = RobotError::InvalidFileFormat {
            file_name: "a.txt".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid file format");
    }

    #[test]
    fn test_storage_error_hides_details() {
        let err: ApiError = RobotError::Storage(StorageError::LockPoisoned).into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.message, "Storage operation failed");
    }
}
