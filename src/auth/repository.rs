// Database repositories for accounts and refresh tokens

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::auth::{
    error::AuthError,
    models::{Account, RefreshToken, Role},
    roles::AccountKind,
};

/// Persistence for one kind of account
#[async_trait]
pub trait AccountStore<K: AccountKind>: Send + Sync {
    /// Insert a new account; fails with `DuplicateAccount` when the email is taken
    async fn create(&self, account: Account<K::Profile>) -> Result<Account<K::Profile>, AuthError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account<K::Profile>>, AuthError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account<K::Profile>>, AuthError>;
}

/// Persistence for refresh tokens, shared by every role
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn store(&self, record: RefreshToken) -> Result<(), AuthError>;

    /// Look up a record by the opaque token the client presented
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AuthError>;
}

/// Hash a token using SHA-256
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

type AccountRow<P> = (Uuid, String, String, Json<P>, DateTime<Utc>);

fn account_from_row<P>((id, email, password_hash, profile, created_at): AccountRow<P>) -> Account<P> {
    Account {
        id,
        email,
        password_hash,
        profile: profile.0,
        created_at,
    }
}

/// PostgreSQL account repository
///
/// Each role has its own table with the same layout; profile fields are stored
/// as JSONB beside the credential columns.
pub struct PgAccountStore<K> {
    pool: PgPool,
    _kind: PhantomData<fn() -> K>,
}

impl<K: AccountKind> PgAccountStore<K> {
    /// Create a new PgAccountStore
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<K: AccountKind> AccountStore<K> for PgAccountStore<K> {
    async fn create(&self, account: Account<K::Profile>) -> Result<Account<K::Profile>, AuthError> {
        let query = format!(
            "INSERT INTO {} (id, email, password_hash, profile, created_at) VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, email, password_hash, profile, created_at",
            K::TABLE
        );

        let row: AccountRow<K::Profile> = sqlx::query_as(&query)
            .bind(account.id)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(Json(&account.profile))
            .bind(account.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AuthError::from_insert)?;

        Ok(account_from_row(row))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account<K::Profile>>, AuthError> {
        let query = format!(
            "SELECT id, email, password_hash, profile, created_at FROM {} WHERE email = $1",
            K::TABLE
        );

        let row: Option<AccountRow<K::Profile>> = sqlx::query_as(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(account_from_row))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account<K::Profile>>, AuthError> {
        let query = format!(
            "SELECT id, email, password_hash, profile, created_at FROM {} WHERE id = $1",
            K::TABLE
        );

        let row: Option<AccountRow<K::Profile>> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(account_from_row))
    }
}

/// PostgreSQL refresh token repository
pub struct PgRefreshTokenStore {
    pool: PgPool,
}

impl PgRefreshTokenStore {
    /// Create a new PgRefreshTokenStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn store(&self, record: RefreshToken) -> Result<(), AuthError> {
        sqlx::query(
            "INSERT INTO refresh_tokens (id, account_id, role, token_hash, expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id)
        .bind(record.account_id)
        .bind(record.role)
        .bind(&record.token_hash)
        .bind(record.expires_at)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        let row: Option<(Uuid, Uuid, Role, String, DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, account_id, role, token_hash, expires_at, created_at \
             FROM refresh_tokens WHERE token_hash = $1",
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(
            |(id, account_id, role, token_hash, expires_at, created_at)| RefreshToken {
                id,
                account_id,
                role,
                token_hash,
                expires_at,
                created_at,
            },
        ))
    }
}
