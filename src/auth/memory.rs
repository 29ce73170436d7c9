// In-memory account and refresh token stores
// Backs the `memory` storage backend and the test suites

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{
    error::AuthError,
    models::{Account, RefreshToken},
    repository::{hash_token, AccountStore, RefreshTokenStore},
    roles::AccountKind,
};

/// Account store keyed by id; email uniqueness is checked under the write lock
pub struct MemoryAccountStore<K: AccountKind> {
    accounts: RwLock<HashMap<Uuid, Account<K::Profile>>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: AccountKind> MemoryAccountStore<K> {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            _kind: PhantomData,
        }
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

impl<K: AccountKind> Default for MemoryAccountStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: AccountKind> AccountStore<K> for MemoryAccountStore<K> {
    async fn create(&self, account: Account<K::Profile>) -> Result<Account<K::Profile>, AuthError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|existing| existing.email == account.email) {
            return Err(AuthError::DuplicateAccount);
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account<K::Profile>>, AuthError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|account| account.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account<K::Profile>>, AuthError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }
}

/// Refresh token store keyed by token hash
#[derive(Default)]
pub struct MemoryRefreshTokenStore {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn store(&self, record: RefreshToken) -> Result<(), AuthError> {
        self.tokens
            .write()
            .await
            .insert(record.token_hash.clone(), record);
        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        Ok(self.tokens.read().await.get(&hash_token(token)).cloned())
    }
}
