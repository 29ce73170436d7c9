// Account service - register, login, refresh and profile for one role

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth::{
    error::AuthError,
    models::{Account, ProfileResponse, RefreshToken, TokenPair},
    password::{CredentialHasher, PasswordPolicy},
    repository::{hash_token, AccountStore, RefreshTokenStore},
    roles::AccountKind,
    token::TokenService,
};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Authentication service for one kind of account
///
/// Every role runs the same state machine; only `K` changes.
pub struct AccountService<K: AccountKind> {
    accounts: Arc<dyn AccountStore<K>>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    hasher: CredentialHasher,
    token_service: Arc<TokenService>,
    clock: Arc<dyn Clock>,
}

impl<K: AccountKind> AccountService<K> {
    /// Create a new AccountService using wall-clock time
    pub fn new(
        accounts: Arc<dyn AccountStore<K>>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        hasher: CredentialHasher,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self::with_clock(accounts, refresh_tokens, hasher, token_service, Arc::new(SystemClock))
    }

    /// Create a new AccountService with an explicit clock
    pub fn with_clock(
        accounts: Arc<dyn AccountStore<K>>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        hasher: CredentialHasher,
        token_service: Arc<TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            refresh_tokens,
            hasher,
            token_service,
            clock,
        }
    }

    /// Register a new account
    ///
    /// No tokens are issued; the caller logs in separately.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        profile: K::Profile,
    ) -> Result<Uuid, AuthError> {
        let email = normalize_email(email);
        info!(role = %K::ROLE, email = %email, "Attempting to register account");

        if self.accounts.find_by_email(&email).await?.is_some() {
            warn!(role = %K::ROLE, email = %email, "Account already exists");
            return Err(AuthError::DuplicateAccount);
        }

        if !PasswordPolicy::is_complex(password) {
            warn!(role = %K::ROLE, "Password does not meet complexity requirements");
            return Err(AuthError::WeakPassword);
        }

        let password_hash = self.hasher.hash(password).map_err(|e| {
            error!(role = %K::ROLE, "Failed to hash password: {}", e);
            e
        })?;

        // The store's unique index settles a race between two registrations
        let account = self
            .accounts
            .create(Account {
                id: Uuid::new_v4(),
                email,
                password_hash,
                profile,
                created_at: self.clock.now(),
            })
            .await?;

        info!(role = %K::ROLE, account_id = %account.id, "Account registered successfully");
        Ok(account.id)
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let email = normalize_email(email);
        info!(role = %K::ROLE, email = %email, "Attempting to login");

        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                warn!(role = %K::ROLE, "Invalid email or password");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(&account.password_hash, password) {
            warn!(role = %K::ROLE, "Invalid email or password");
            return Err(AuthError::InvalidCredentials);
        }

        let now = self.clock.now();
        let access_token = self
            .token_service
            .issue_access_token_at(&account.id.to_string(), now)?;
        let refresh_token = self.token_service.issue_refresh_token();

        self.refresh_tokens
            .store(RefreshToken {
                id: Uuid::new_v4(),
                account_id: account.id,
                role: K::ROLE,
                token_hash: hash_token(&refresh_token),
                expires_at: TokenService::refresh_token_expiry(now),
                created_at: now,
            })
            .await?;

        info!(role = %K::ROLE, account_id = %account.id, "Logged in successfully");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Issue a new access token for a stored refresh token
    ///
    /// The refresh token itself is reused, not rotated.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<String, AuthError> {
        debug!(role = %K::ROLE, "Attempting to refresh token");

        let record = match self.refresh_tokens.find(refresh_token).await? {
            Some(record) if record.role == K::ROLE => record,
            Some(record) => {
                warn!(
                    role = %K::ROLE,
                    token_role = %record.role,
                    "Refresh token belongs to another role"
                );
                return Err(AuthError::InvalidRefreshToken);
            }
            None => {
                warn!(role = %K::ROLE, "Invalid refresh token");
                return Err(AuthError::InvalidRefreshToken);
            }
        };

        let now = self.clock.now();
        if now > record.expires_at {
            warn!(role = %K::ROLE, account_id = %record.account_id, "Refresh token expired");
            return Err(AuthError::RefreshTokenExpired);
        }

        let account = self
            .accounts
            .find_by_id(record.account_id)
            .await?
            .ok_or_else(|| {
                error!(
                    role = %K::ROLE,
                    account_id = %record.account_id,
                    "Account not found for refresh token"
                );
                AuthError::AccountNotFound
            })?;

        let access_token = self
            .token_service
            .issue_access_token_at(&account.id.to_string(), now)?;

        info!(role = %K::ROLE, account_id = %account.id, "Token refreshed successfully");
        Ok(access_token)
    }

    /// Get the profile for an account id taken from a verified access token
    pub async fn get_profile(&self, account_id: &str) -> Result<ProfileResponse<K::Profile>, AuthError> {
        let id = Uuid::parse_str(account_id).map_err(|_| {
            debug!(role = %K::ROLE, "Subject is not an account id");
            AuthError::AccountNotFound
        })?;

        let account = self
            .accounts
            .find_by_id(id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        Ok(account.into())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
