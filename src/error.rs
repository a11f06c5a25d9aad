//! Error types for the catalog API
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == Field Error ==
/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field as it appears in the request body
    pub field: String,
    /// Human readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// == API Error Enum ==
/// Unified error type for the catalog API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad pagination parameter (page/limit)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write payload failed validation
    #[error("Validation failed ({} violation(s))", .0.len())]
    ValidationFailed(Vec<FieldError>),

    /// Data store could not be reached
    #[error("Data store unavailable: {0}")]
    StoreUnavailable(String),

    /// Cache store could not be reached or refused the operation
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("serialization failed: {err}"))
    }
}

/// Body rejections share the `ValidationFailed` shape. Type errors name the
/// offending field; anything else is reported against `body`.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let violation = match rejection {
            JsonRejection::JsonDataError(ref err) => data_error_violation(&err.body_text()),
            other => FieldError::new("body", other.body_text()),
        };
        ApiError::ValidationFailed(vec![violation])
    }
}

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Splits `<prefix>: <path>: <message> at line L column C` into a field error.
fn data_error_violation(text: &str) -> FieldError {
    let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text);
    let detail = detail.split(" at line ").next().unwrap_or(detail);

    match detail.split_once(": ") {
        Some((path, message))
            if !path.is_empty()
                && path
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']')) =>
        {
            FieldError::new(path, message)
        }
        _ => FieldError::new("body", detail),
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Store and cache details go to the log, never into the body.
        if matches!(
            self,
            ApiError::StoreUnavailable(_) | ApiError::CacheUnavailable(_) | ApiError::Internal(_)
        ) {
            error!(error = %self, "request failed");
        }

        let (status, body) = match self {
            ApiError::InvalidParameter(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::ValidationFailed(violations) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation failed",
                    "violations": violations,
                }),
            ),
            ApiError::StoreUnavailable(_) | ApiError::CacheUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "Service temporarily unavailable" }),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog API.
pub type Result<T> = std::result::Result<T, ApiError>;
