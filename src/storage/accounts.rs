//! Account repository
//!
//! Port trait for account persistence plus the in-memory adapter used by
//! the services and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{DomainError, DomainResult};
use crate::models::{Account, AccountId};

/// Port for account persistence
pub trait AccountRepository: Send + Sync {
    /// Insert or replace an account
    fn save(&self, account: Account) -> DomainResult<()>;

    /// Get an account by ID
    fn find_by_id(&self, id: AccountId) -> DomainResult<Option<Account>>;

    /// Get all accounts, sorted by name
    fn find_all(&self) -> DomainResult<Vec<Account>>;

    /// Delete an account, reporting whether it existed
    fn delete_by_id(&self, id: AccountId) -> DomainResult<bool>;

    /// Check if an account exists
    fn exists_by_id(&self, id: AccountId) -> DomainResult<bool>;
}

/// In-memory account repository
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    data: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn save(&self, account: Account) -> DomainResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(account.id(), account);
        Ok(())
    }

    fn find_by_id(&self, id: AccountId) -> DomainResult<Option<Account>> {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    fn find_all(&self) -> DomainResult<Vec<Account>> {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(accounts)
    }

    fn delete_by_id(&self, id: AccountId) -> DomainResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    fn exists_by_id(&self, id: AccountId) -> DomainResult<bool> {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(&id))
    }
}
