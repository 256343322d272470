//! Error handling module for postboard.
//!
//! Provides a single error type shared by the stores, the application service and the
//! HTTP layer, with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const UPLOAD_FAILED: &str = "UPLOAD_FAILED";
    pub const URL_RESOLUTION_FAILED: &str = "URL_RESOLUTION_FAILED";
    pub const INSERT_FAILED: &str = "INSERT_FAILED";
    pub const FETCH_FAILED: &str = "FETCH_FAILED";
    pub const DELETE_FAILED: &str = "DELETE_FAILED";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const BLOB_ERROR: &str = "BLOB_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Which user flow a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePath {
    /// Image upload, URL resolution or document insert.
    Write,
    /// Question fetch or post delete.
    ReadDelete,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Required field missing
    Validation(String),
    /// Malformed input (including unreadable stored values)
    BadRequest(String),
    /// Image upload to the blob store failed
    Upload(String),
    /// Resolving an uploaded blob to its public URL failed
    ResolveUrl(String),
    /// Writing the post document failed
    Insert(String),
    /// Loading questions failed
    Fetch(String),
    /// Removing a post failed
    Delete(String),
    /// Document store error
    Database(String),
    /// Blob store error
    Blob(String),
    /// Internal error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upload(_)
            | AppError::ResolveUrl(_)
            | AppError::Insert(_)
            | AppError::Fetch(_)
            | AppError::Delete(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Blob(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Upload(_) => codes::UPLOAD_FAILED,
            AppError::ResolveUrl(_) => codes::URL_RESOLUTION_FAILED,
            AppError::Insert(_) => codes::INSERT_FAILED,
            AppError::Fetch(_) => codes::FETCH_FAILED,
            AppError::Delete(_) => codes::DELETE_FAILED,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Blob(_) => codes::BLOB_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::Upload(msg)
            | AppError::ResolveUrl(msg)
            | AppError::Insert(msg)
            | AppError::Fetch(msg)
            | AppError::Delete(msg)
            | AppError::Database(msg)
            | AppError::Blob(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }

    /// The user flow this error surfaced in, if it belongs to one.
    pub fn failure_path(&self) -> Option<FailurePath> {
        match self {
            AppError::Upload(_) | AppError::ResolveUrl(_) | AppError::Insert(_) => {
                Some(FailurePath::Write)
            }
            AppError::Fetch(_) | AppError::Delete(_) => Some(FailurePath::ReadDelete),
            _ => None,
        }
    }

    /// Rebuild an error from the code and message of an error envelope.
    pub fn from_code(code: &str, message: String) -> Self {
        match code {
            codes::NOT_FOUND => AppError::NotFound(message),
            codes::VALIDATION_ERROR => AppError::Validation(message),
            codes::BAD_REQUEST => AppError::BadRequest(message),
            codes::UPLOAD_FAILED => AppError::Upload(message),
            codes::URL_RESOLUTION_FAILED => AppError::ResolveUrl(message),
            codes::INSERT_FAILED => AppError::Insert(message),
            codes::FETCH_FAILED => AppError::Fetch(message),
            codes::DELETE_FAILED => AppError::Delete(message),
            codes::DATABASE_ERROR => AppError::Database(message),
            codes::BLOB_ERROR => AppError::Blob(message),
            _ => AppError::Internal(message),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Blob I/O error: {:?}", err);
        AppError::Blob(format!("Blob I/O error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP client error: {:?}", err);
        AppError::Internal(format!("HTTP client error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_paths() {
        assert_eq!(
            AppError::Upload("x".into()).failure_path(),
            Some(FailurePath::Write)
        );
        assert_eq!(
            AppError::ResolveUrl("x".into()).failure_path(),
            Some(FailurePath::Write)
        );
        assert_eq!(
            AppError::Insert("x".into()).failure_path(),
            Some(FailurePath::Write)
        );
        assert_eq!(
            AppError::Fetch("x".into()).failure_path(),
            Some(FailurePath::ReadDelete)
        );
        assert_eq!(
            AppError::Delete("x".into()).failure_path(),
            Some(FailurePath::ReadDelete)
        );
        assert_eq!(AppError::Validation("x".into()).failure_path(), None);
    }

    #[test]
    fn test_from_code_round_trips_variant() {
        let original = AppError::ResolveUrl("no url".to_string());
        let rebuilt = AppError::from_code(original.error_code(), original.message());
        assert!(matches!(rebuilt, AppError::ResolveUrl(ref m) if m == "no url"));

        let unknown = AppError::from_code("SOMETHING_ELSE", "boom".to_string());
        assert!(matches!(unknown, AppError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Insert("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::Fetch("store offline".to_string());
        assert_eq!(err.to_string(), "FETCH_FAILED: store offline");
    }
}
