//! # API Error Type
//!
//! Unified error type for HTTP handlers, mapping domain errors to status
//! codes and a JSON body.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in Storefront                            │
//! │                                                                         │
//! │  ValidationError (core) ───────────► 400  Bad Request                  │
//! │  Session extractor (no identity) ──► 401  Unauthorized                 │
//! │  AdminSession extractor ───────────► 403  Forbidden                    │
//! │  DbError::NotFound ────────────────► 404  Not Found                    │
//! │  DbError::UniqueViolation ─────────► 409  Conflict                     │
//! │  DbError::ReferenceViolation ──────► 409  Conflict                     │
//! │  everything else ──────────────────► 500  (logged, message withheld)   │
//! │                                                                         │
//! │  Every failure body is  {"error": "<message>"}                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Authorization failures are produced by extractors, which run before body
//! deserialization and handler validation - so an unauthorized malformed
//! request reads as 403, never 400.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use storefront_core::ValidationError;
use storefront_db::DbError;

/// Application-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Referenced entity absent (404).
    #[error("{0}")]
    NotFound(String),

    /// Malformed or missing field (400).
    #[error("{0}")]
    Validation(String),

    /// No valid session (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but insufficient role (403).
    #[error("{0}")]
    Forbidden(String),

    /// Unique constraint or reference conflict (409).
    #[error("{0}")]
    Conflict(String),

    /// Internal server error (500). Logged, never echoed to the client.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details are logged for operators, not returned.
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Converts validation errors to API errors (400).
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::UniqueViolation { field } => {
                ApiError::Conflict(format!("{} already exists", field))
            }
            DbError::ReferenceViolation { message } => ApiError::Conflict(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::not_found("Product", 5).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("who?").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::forbidden("no").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::conflict("dup").status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_db_error_conversion() {
        let err: ApiError = DbError::not_found("Product", 5).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = DbError::duplicate("email").into();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(err.to_string(), "email already exists");
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ApiError = ValidationError::InvalidField("name").into();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid or missing \"name\" field");
    }
}
