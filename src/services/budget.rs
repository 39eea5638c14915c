//! Budget service
//!
//! Creates monthly budgets and records spending against them. Threshold
//! events raised by the aggregate surface through the command result.

use crate::error::{DomainError, DomainResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, CategoryId, Money};
use crate::storage::{BudgetRepository, CategoryRepository};

use super::CommandResult;

/// Service for budget management
pub struct BudgetService<'a> {
    budgets: &'a dyn BudgetRepository,
    categories: &'a dyn CategoryRepository,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(budgets: &'a dyn BudgetRepository, categories: &'a dyn CategoryRepository) -> Self {
        Self {
            budgets,
            categories,
        }
    }

    /// Create a budget for a category and period
    ///
    /// A category can have at most one budget per period.
    pub fn create(
        &self,
        category_id: CategoryId,
        limit: Money,
        period: BudgetPeriod,
    ) -> DomainResult<CommandResult<Budget>> {
        // Verify the category exists
        if self.categories.find_by_id(category_id)?.is_none() {
            return Err(DomainError::not_found("Category", category_id));
        }

        if self
            .budgets
            .find_by_category_id_and_period(category_id, period)?
            .is_some()
        {
            return Err(DomainError::invalid_state(format!(
                "A budget already exists for category {category_id} and period {period}"
            )));
        }

        let mut budget = Budget::create(category_id, limit, period)?;

        let events = budget.take_events();
        self.budgets.save(budget.clone())?;

        Ok(CommandResult {
            state: budget,
            events,
        })
    }

    /// Count an expense against a budget
    pub fn record_expense(
        &self,
        budget_id: BudgetId,
        amount: Money,
    ) -> DomainResult<CommandResult<Budget>> {
        let mut budget = self
            .budgets
            .find_by_id(budget_id)?
            .ok_or_else(|| DomainError::not_found("Budget", budget_id))?;

        budget.record_expense(amount)?;

        let events = budget.take_events();
        self.budgets.save(budget.clone())?;

        Ok(CommandResult {
            state: budget,
            events,
        })
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> DomainResult<Budget> {
        self.budgets
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Budget", id))
    }

    /// Get all budgets, ordered by period
    pub fn list(&self) -> DomainResult<Vec<Budget>> {
        self.budgets.find_all()
    }

    /// Get all budgets for a period
    pub fn for_period(&self, period: BudgetPeriod) -> DomainResult<Vec<Budget>> {
        self.budgets.find_by_period(period)
    }
}
