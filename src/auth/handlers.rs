// HTTP handlers for account endpoints
// The same four handlers serve every role; the router picks the kind

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedSubject,
    models::{
        AccessTokenResponse, LoginRequest, ProfileResponse, RefreshRequest, RegisterRequest,
        RegisterResponse, TokenPair,
    },
    roles::AccountKind,
    service::AccountService,
};

/// Register a new account
/// POST {prefix}/register
pub async fn register_handler<K: AccountKind>(
    State(service): State<Arc<AccountService<K>>>,
    payload: Result<Json<RegisterRequest<K::Profile>>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let Json(request) = payload?;
    request.validate()?;

    let id = service
        .register(&request.email, &request.password, request.profile)
        .await?;

    info!(role = %K::ROLE, account_id = %id, "Registration request completed");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            status: "success".to_string(),
            message: format!("{} registered successfully", K::ROLE),
            id,
        }),
    ))
}

/// Login
/// POST {prefix}/login
pub async fn login_handler<K: AccountKind>(
    State(service): State<Arc<AccountService<K>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenPair>, AuthError> {
    let Json(request) = payload?;
    request.validate()?;

    let pair = service.login(&request.email, &request.password).await?;
    Ok(Json(pair))
}

/// Exchange a refresh token for a new access token
/// POST {prefix}/refresh
pub async fn refresh_handler<K: AccountKind>(
    State(service): State<Arc<AccountService<K>>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AccessTokenResponse>, AuthError> {
    let Json(request) = payload?;
    request
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let access_token = service.refresh_token(&request.refresh_token).await?;
    Ok(Json(AccessTokenResponse { access_token }))
}

/// Profile of the authenticated account (protected endpoint)
/// GET {prefix}/me
pub async fn me_handler<K: AccountKind>(
    State(service): State<Arc<AccountService<K>>>,
    subject: AuthenticatedSubject,
) -> Result<Json<ProfileResponse<K::Profile>>, AuthError> {
    let profile = service.get_profile(&subject.subject_id).await?;
    Ok(Json(profile))
}
