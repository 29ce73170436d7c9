use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::error::{error_response, INTERNAL_MESSAGE};

/// Error types for order operations
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<JsonRejection> for OrderError {
    fn from(rejection: JsonRejection) -> Self {
        OrderError::ValidationError(rejection.body_text())
    }
}

/// An id that is not a UUID cannot name an existing order
impl From<PathRejection> for OrderError {
    fn from(_: PathRejection) -> Self {
        OrderError::NotFound
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        match self {
            OrderError::NotFound => {
                error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Order not found")
            }
            OrderError::ValidationError(msg) => {
                error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            OrderError::Database(err) => {
                error!("Database error in orders: {:?}", err);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", INTERNAL_MESSAGE)
            }
        }
    }
}
