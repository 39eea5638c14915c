//! Transaction repository
//!
//! Port trait for transaction persistence plus the in-memory adapter.
//! List queries come back in chronological order and date ranges are
//! inclusive on both ends.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{DomainError, DomainResult};
use crate::models::{AccountId, CategoryId, Transaction, TransactionId};

/// Port for transaction persistence
pub trait TransactionRepository: Send + Sync {
    /// Insert or replace a transaction
    fn save(&self, transaction: Transaction) -> DomainResult<()>;

    /// Get a transaction by ID
    fn find_by_id(&self, id: TransactionId) -> DomainResult<Option<Transaction>>;

    /// Get all transactions for an account
    fn find_by_account_id(&self, account_id: AccountId) -> DomainResult<Vec<Transaction>>;

    /// Get all transactions dated within `[start, end]`
    fn find_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Transaction>>;

    /// Get an account's transactions dated within `[start, end]`
    fn find_by_account_id_and_date_between(
        &self,
        account_id: AccountId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Transaction>>;

    /// Get all transactions assigned to a category
    fn find_by_category_id(&self, category_id: CategoryId) -> DomainResult<Vec<Transaction>>;

    /// Delete a transaction, reporting whether it existed
    fn delete_by_id(&self, id: TransactionId) -> DomainResult<bool>;
}

/// In-memory transaction repository
#[derive(Debug, Default)]
pub struct InMemoryTransactionRepository {
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl InMemoryTransactionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted<F>(&self, keep: F) -> DomainResult<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool,
    {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().filter(|t| keep(t)).cloned().collect();
        transactions.sort_by(|a, b| {
            a.date()
                .cmp(&b.date())
                .then(a.created_at().cmp(&b.created_at()))
        });
        Ok(transactions)
    }
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn save(&self, transaction: Transaction) -> DomainResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(transaction.id(), transaction);
        Ok(())
    }

    fn find_by_id(&self, id: TransactionId) -> DomainResult<Option<Transaction>> {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    fn find_by_account_id(&self, account_id: AccountId) -> DomainResult<Vec<Transaction>> {
        self.collect_sorted(|t| t.account_id() == account_id)
    }

    fn find_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Transaction>> {
        self.collect_sorted(|t| t.date() >= start && t.date() <= end)
    }

    fn find_by_account_id_and_date_between(
        &self,
        account_id: AccountId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Transaction>> {
        self.collect_sorted(|t| {
            t.account_id() == account_id && t.date() >= start && t.date() <= end
        })
    }

    fn find_by_category_id(&self, category_id: CategoryId) -> DomainResult<Vec<Transaction>> {
        self.collect_sorted(|t| t.category_id() == Some(category_id))
    }

    fn delete_by_id(&self, id: TransactionId) -> DomainResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }
}
