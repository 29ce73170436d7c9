// Bearer-token gate for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, token::TokenService};

/// Subject of a verified access token, placed in request extensions by
/// [`require_auth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSubject {
    pub subject_id: String,
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthError::Unauthenticated("missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| AuthError::Unauthenticated("invalid Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| {
            AuthError::Unauthenticated("Authorization header must use the Bearer scheme".to_string())
        })?;

    if token.is_empty() {
        return Err(AuthError::Unauthenticated("empty bearer token".to_string()));
    }

    Ok(token)
}

/// Verify the bearer token on a request and return its subject
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthenticatedSubject, AuthError> {
    let token = bearer_token(headers)?;
    let subject_id = tokens.verify_access_token(token)?;

    Ok(AuthenticatedSubject { subject_id })
}

/// Middleware rejecting requests without a valid access token
///
/// Never touches the store; verification is signature and expiry only.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let endpoint = request.uri().path().to_string();

    let subject = authenticate(request.headers(), &tokens).map_err(|e| {
        warn!("Rejected request to protected endpoint {}: {}", endpoint, e);
        e
    })?;

    debug!(subject_id = %subject.subject_id, endpoint = %endpoint, "Request authenticated");
    request.extensions_mut().insert(subject);

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedSubject
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedSubject>()
            .cloned()
            .ok_or_else(|| AuthError::Unauthenticated("request was not authenticated".to_string()))
    }
}
