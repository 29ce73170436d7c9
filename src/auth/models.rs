// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::error::AuthError;

/// The four account kinds, each with its own table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Customer,
    Coach,
    Executor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Customer => "customer",
            Role::Coach => "coach",
            Role::Executor => "executor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account record, generic over the role-specific profile fields
#[derive(Debug, Clone)]
pub struct Account<P> {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub profile: P,
    pub created_at: DateTime<Utc>,
}

/// Refresh token record
///
/// `token_hash` is the SHA-256 digest of the opaque token handed to the client.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: Uuid,
    pub account_id: Uuid,
    pub role: Role,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// The email is checked after trimming; the service normalizes it the same way
fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if !validator::validate_email(email.trim()) {
        return Err(AuthError::Validation(
            "email must be a valid email address".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(AuthError::Validation("password is required".to_string()));
    }
    Ok(())
}

/// Registration request DTO; role-specific fields sit beside the credentials
#[derive(Debug, Deserialize)]
pub struct RegisterRequest<P> {
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: P,
}

impl<P: Validate> RegisterRequest<P> {
    /// Presence and format checks; password complexity is the service's job
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_credentials(&self.email, &self.password)?;
        self.profile
            .validate()
            .map_err(|e| AuthError::Validation(e.to_string()))
    }
}

/// Login request DTO
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Same email rules as registration, so a padded address that registered can log in
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_credentials(&self.email, &self.password)
    }
}

/// Token refresh request DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Registration response DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: String,
    pub message: String,
    pub id: Uuid,
}

/// Login response DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token refresh response DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Profile projection (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse<P> {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: P,
}

impl<P> From<Account<P>> for ProfileResponse<P> {
    fn from(account: Account<P>) -> Self {
        Self {
            id: account.id,
            email: account.email,
            created_at: account.created_at,
            profile: account.profile,
        }
    }
}
