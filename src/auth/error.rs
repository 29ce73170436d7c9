// Authentication error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use crate::error::{error_response, INTERNAL_MESSAGE};

/// Authentication error types
///
/// Client-facing variants carry no detail that would tell an attacker which half
/// of a credential pair was wrong. Infrastructure faults keep their root cause.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Account with this email already exists")]
    DuplicateAccount,

    #[error("Password must be at least 8 characters and contain an uppercase letter, a lowercase letter, a digit and a special character")]
    WeakPassword,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Account not found")]
    AccountNotFound,

    /// Missing or malformed Authorization header
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Bad signature, expired, or missing subject claim
    #[error("Invalid token")]
    InvalidToken,

    /// Request-boundary validation failure
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Token signing error: {0}")]
    TokenSigning(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateAccount => StatusCode::CONFLICT,
            AuthError::WeakPassword | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::RefreshTokenExpired
            | AuthError::Unauthenticated(_)
            | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::AccountNotFound => StatusCode::NOT_FOUND,
            AuthError::Hashing(_) | AuthError::TokenSigning(_) | AuthError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable code used in the error body
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::DuplicateAccount => "DUPLICATE_ACCOUNT",
            AuthError::WeakPassword => "WEAK_PASSWORD",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            AuthError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            AuthError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            AuthError::Unauthenticated(_) => "UNAUTHENTICATED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::Hashing(_) | AuthError::TokenSigning(_) | AuthError::Database(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Message that is safe to send to clients
    pub fn error_message(&self) -> String {
        match self {
            AuthError::Hashing(_) | AuthError::TokenSigning(_) | AuthError::Database(_) => {
                INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Map an insert failure; a unique violation on email means the account exists
    pub(crate) fn from_insert(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AuthError::DuplicateAccount;
            }
        }
        AuthError::Database(err)
    }
}

/// Malformed or incomplete request bodies are validation failures
impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Internal error in auth: {:?}", self);
        } else if status == StatusCode::UNAUTHORIZED {
            warn!("Authentication failure: {}", self);
        } else {
            debug!("Auth request rejected: {}", self);
        }

        error_response(status, self.error_code(), self.error_message())
    }
}
