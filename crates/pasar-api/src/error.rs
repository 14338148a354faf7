//! HTTP error response conversion
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`.
//! Use `AppError` (or types that implement `Into<AppError>`) for errors and
//! `.map_err(Into::into)` so they become `HttpAppError` and render
//! consistently (status, body, logging).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pasar_core::{AppError, ErrorMetadata, LogLevel};
use pasar_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse. Necessary because of
/// Rust's orphan rules - we can't implement IntoResponse (external trait)
/// for AppError (external type from pasar-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            // Validation failures surface verbatim so the user sees the
            // validator's own message.
            StorageError::Rejected(inner) => inner,
            StorageError::InvalidPath(msg) => AppError::InvalidInput(msg),
            StorageError::StoreFailed(_) => AppError::Storage(err.to_string()),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            StorageError::IoError(e) => AppError::Storage(e.to_string()),
        };
        HttpAppError(app)
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let err = self.0;

        match err.log_level() {
            LogLevel::Debug => tracing::debug!(error = %err, code = err.error_code(), "Request failed"),
            LogLevel::Warn => tracing::warn!(error = %err, code = err.error_code(), "Request failed"),
            LogLevel::Error => tracing::error!(error = %err, code = err.error_code(), "Request failed"),
        }

        let status =
            StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorResponse {
            error: err.client_message(),
            code: err.error_code().to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action().map(str::to_string),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_rejection_keeps_validator_message() {
        let err = StorageError::Rejected(AppError::InvalidInput(
            "Ekstensi file tidak valid.".to_string(),
        ));
        let HttpAppError(app) = HttpAppError::from(err);
        assert_eq!(app.client_message(), "Ekstensi file tidak valid.");
        assert_eq!(app.http_status_code(), 400);
    }

    #[test]
    fn store_failure_maps_to_storage_error() {
        let err = StorageError::StoreFailed("disk full".to_string());
        let HttpAppError(app) = HttpAppError::from(err);
        assert_eq!(app.error_code(), "STORAGE_ERROR");
        assert_eq!(app.http_status_code(), 500);
        // Internal detail stays out of the client message.
        assert!(!app.client_message().contains("disk full"));
    }
}
