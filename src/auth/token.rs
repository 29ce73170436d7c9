// JWT access tokens and opaque refresh tokens

use crate::auth::error::AuthError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

/// Access tokens live for one hour
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 3600;

/// Refresh tokens live for seven days
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 3600;

const REFRESH_TOKEN_LENGTH: usize = 64;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // account id
    pub exp: i64,    // expiration timestamp
    pub iat: i64,    // issued at timestamp
}

/// Token service for JWT operations
///
/// Built once from configuration; the signing secret never changes afterwards.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a new TokenService with secret key
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Generate an access token (1 hour) issued now
    pub fn issue_access_token(&self, subject_id: &str) -> Result<String, AuthError> {
        self.issue_access_token_at(subject_id, Utc::now())
    }

    /// Generate an access token (1 hour) issued at the given instant
    pub fn issue_access_token_at(
        &self,
        subject_id: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: subject_id.to_string(),
            iat,
            exp: iat + ACCESS_TOKEN_TTL_SECONDS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenSigning(e.to_string()))
    }

    /// Validate an access token and return its subject id
    pub fn verify_access_token(&self, token: &str) -> Result<String, AuthError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    /// Validate an access token and return all of its claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Access token rejected: {}", e);
                AuthError::InvalidToken
            })
    }

    /// Generate an opaque refresh token
    ///
    /// Pure lookup key with no embedded claims; the caller stores it with its expiry.
    pub fn issue_refresh_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(REFRESH_TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Expiry for a refresh token issued at the given instant
    pub fn refresh_token_expiry(issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::seconds(REFRESH_TOKEN_TTL_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes")
    }

    fn sign_raw(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_access_token_expiration_is_one_hour() {
        let service = test_token_service();
        let token = service.issue_access_token("account-1").unwrap();
        let claims = service.decode_claims(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_returns_subject() {
        let service = test_token_service();
        let token = service.issue_access_token("account-42").unwrap();

        assert_eq!(service.verify_access_token(&token).unwrap(), "account-42");
        // Verification is repeatable
        assert_eq!(service.verify_access_token(&token).unwrap(), "account-42");
    }

    #[test]
    fn test_token_signature_verification() {
        let service1 = TokenService::new("secret1");
        let service2 = TokenService::new("secret2");

        let token = service1.issue_access_token("account-1").unwrap();

        assert!(service1.verify_access_token(&token).is_ok());
        assert!(matches!(
            service2.verify_access_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_token_service();
        let issued_at = Utc::now() - Duration::seconds(ACCESS_TOKEN_TTL_SECONDS + 5);
        let token = service.issue_access_token_at("account-1", issued_at).unwrap();

        assert!(matches!(
            service.verify_access_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let service = test_token_service();
        let exp = Utc::now().timestamp() + 600;
        let token = sign_raw(
            &serde_json::json!({ "exp": exp }),
            "test_secret_key_for_testing_purposes",
        );

        assert!(matches!(
            service.verify_access_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_non_string_subject_is_rejected() {
        let service = test_token_service();
        let exp = Utc::now().timestamp() + 600;
        let token = sign_raw(
            &serde_json::json!({ "sub": 42, "exp": exp }),
            "test_secret_key_for_testing_purposes",
        );

        assert!(matches!(
            service.verify_access_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.verify_access_token("").is_err());
        assert!(service.verify_access_token("not.a.token").is_err());
        assert!(service.verify_access_token("invalid_token_format").is_err());
        assert!(service
            .verify_access_token("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_refresh_tokens_are_opaque_and_unique() {
        let service = test_token_service();
        let tokens: HashSet<String> = (0..100).map(|_| service.issue_refresh_token()).collect();

        assert_eq!(tokens.len(), 100);
        for token in &tokens {
            assert_eq!(token.len(), 64);
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
            // Not a JWT
            assert!(service.verify_access_token(token).is_err());
        }
    }

    #[test]
    fn test_refresh_token_expiry_is_seven_days() {
        let issued_at = Utc::now();
        let expiry = TokenService::refresh_token_expiry(issued_at);
        assert_eq!((expiry - issued_at).num_days(), 7);
    }

    proptest! {
        #[test]
        fn prop_issue_verify_returns_subject(subject in "[a-zA-Z0-9-]{1,40}") {
            let service = test_token_service();
            let token = service.issue_access_token(&subject)?;
            prop_assert_eq!(service.verify_access_token(&token)?, subject);
        }

        #[test]
        fn prop_different_secrets_reject(
            s1 in "[a-z0-9]{8,32}",
            s2 in "[a-z0-9]{8,32}"
        ) {
            prop_assume!(s1 != s2);
            let token = TokenService::new(&s1).issue_access_token("account-1")?;
            prop_assert!(TokenService::new(&s2).verify_access_token(&token).is_err());
        }

        #[test]
        fn prop_malformed_tokens_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.verify_access_token(&malformed).is_err());
        }
    }
}
