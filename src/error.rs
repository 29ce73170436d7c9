// Shared error response body for the API
// Every module error (auth, orders) renders through this shape

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Consistent error response structure
///
/// Carries both a machine-readable `error_code` and a human-readable `message`.
/// Internal failures never put their root cause here; that goes to the log.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "INVALID_CREDENTIALS", "NOT_FOUND")
    pub error_code: String,

    /// Human-readable error message
    pub message: String,

    /// ISO 8601 timestamp of when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.to_string(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Build a JSON error response with the given status
pub fn error_response(status: StatusCode, error_code: &str, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

/// Shown to clients for every 5xx
pub const INTERNAL_MESSAGE: &str = "An internal server error occurred";
