//! Budget repository
//!
//! Port trait for budget persistence plus the in-memory adapter. A category
//! has at most one budget per period; `find_by_category_id_and_period` is
//! how the services enforce that.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{DomainError, DomainResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, CategoryId};

/// Port for budget persistence
pub trait BudgetRepository: Send + Sync {
    /// Insert or replace a budget
    fn save(&self, budget: Budget) -> DomainResult<()>;

    /// Get a budget by ID
    fn find_by_id(&self, id: BudgetId) -> DomainResult<Option<Budget>>;

    /// Get the budget for a category in a period, if one exists
    fn find_by_category_id_and_period(
        &self,
        category_id: CategoryId,
        period: BudgetPeriod,
    ) -> DomainResult<Option<Budget>>;

    /// Get all budgets for a period
    fn find_by_period(&self, period: BudgetPeriod) -> DomainResult<Vec<Budget>>;

    /// Get all budgets, ordered by period then creation time
    fn find_all(&self) -> DomainResult<Vec<Budget>>;

    /// Delete a budget, reporting whether it existed
    fn delete_by_id(&self, id: BudgetId) -> DomainResult<bool>;
}

/// In-memory budget repository
#[derive(Debug, Default)]
pub struct InMemoryBudgetRepository {
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl InMemoryBudgetRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted<F>(&self, keep: F) -> DomainResult<Vec<Budget>>
    where
        F: Fn(&Budget) -> bool,
    {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().filter(|b| keep(b)).cloned().collect();
        budgets.sort_by(|a, b| {
            a.period()
                .cmp(&b.period())
                .then(a.created_at().cmp(&b.created_at()))
        });
        Ok(budgets)
    }
}

impl BudgetRepository for InMemoryBudgetRepository {
    fn save(&self, budget: Budget) -> DomainResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(budget.id(), budget);
        Ok(())
    }

    fn find_by_id(&self, id: BudgetId) -> DomainResult<Option<Budget>> {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    fn find_by_category_id_and_period(
        &self,
        category_id: CategoryId,
        period: BudgetPeriod,
    ) -> DomainResult<Option<Budget>> {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|b| b.category_id() == category_id && b.period() == period)
            .cloned())
    }

    fn find_by_period(&self, period: BudgetPeriod) -> DomainResult<Vec<Budget>> {
        self.collect_sorted(|b| b.period() == period)
    }

    fn find_all(&self) -> DomainResult<Vec<Budget>> {
        self.collect_sorted(|_| true)
    }

    fn delete_by_id(&self, id: BudgetId) -> DomainResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }
}
