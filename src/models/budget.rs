//! Budget aggregate
//!
//! A budget caps spending for one category over one calendar month. Spending
//! accumulates through `record_expense`; the status climbs from on-track to
//! warning to exceeded and never moves back down.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

use super::events::DomainEvent;
use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::period::BudgetPeriod;

/// Health of a budget relative to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Spending is below the warning threshold
    OnTrack,
    /// Spending reached the warning threshold but not the limit
    Warning,
    /// Spending reached or passed the limit
    Exceeded,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On Track"),
            Self::Warning => write!(f, "Warning"),
            Self::Exceeded => write!(f, "Exceeded"),
        }
    }
}

/// A monthly spending cap for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    id: BudgetId,

    /// Category this budget caps
    category_id: CategoryId,

    /// Spending limit for the period
    limit: Money,

    /// The month this budget covers
    period: BudgetPeriod,

    /// Total recorded spending so far
    spent: Money,

    /// Current health relative to the limit
    status: BudgetStatus,

    /// When the budget was created
    created_at: DateTime<Utc>,

    /// Events emitted since the last drain
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Budget {
    /// Usage ratio at which the budget starts warning
    pub const WARNING_THRESHOLD: f64 = 0.80;

    /// Create a budget with nothing spent yet
    pub fn create(
        category_id: CategoryId,
        limit: Money,
        period: BudgetPeriod,
    ) -> DomainResult<Self> {
        if !limit.is_positive() {
            return Err(DomainError::invalid_argument(format!(
                "Budget limit must be positive, got: {limit}"
            )));
        }

        Ok(Self {
            id: BudgetId::new(),
            category_id,
            limit,
            period,
            spent: Money::zero(limit.currency()),
            status: BudgetStatus::OnTrack,
            created_at: Utc::now(),
            events: Vec::new(),
        })
    }

    /// Rebuild a budget from persisted state
    ///
    /// Skips creation-time validation and emits nothing. Intended for
    /// persistence adapters; everything else goes through [`Budget::create`].
    pub fn reconstitute(
        id: BudgetId,
        category_id: CategoryId,
        limit: Money,
        period: BudgetPeriod,
        spent: Money,
        status: BudgetStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            category_id,
            limit,
            period,
            spent,
            status,
            created_at,
            events: Vec::new(),
        }
    }

    /// Count an expense against this budget and refresh the status
    pub fn record_expense(&mut self, amount: Money) -> DomainResult<()> {
        if !amount.is_positive() {
            return Err(DomainError::invalid_argument(format!(
                "Expense amount must be positive, got: {amount}"
            )));
        }

        self.spent = self.spent.add(amount)?;
        self.update_status();
        Ok(())
    }

    /// How much of the limit is left; negative once overspent
    ///
    /// Fallible only because [`Budget::reconstitute`] can restore a spent
    /// value in a different currency than the limit.
    pub fn remaining_amount(&self) -> DomainResult<Money> {
        self.limit.subtract(self.spent)
    }

    /// Spent divided by limit, as a float ratio; 0.0 for a zero limit
    pub fn usage_percentage(&self) -> f64 {
        self.spent.ratio_of(self.limit)
    }

    pub fn id(&self) -> BudgetId {
        self.id
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn limit(&self) -> Money {
        self.limit
    }

    pub fn period(&self) -> BudgetPeriod {
        self.period
    }

    pub fn spent(&self) -> Money {
        self.spent
    }

    pub fn status(&self) -> BudgetStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Events emitted since the last drain, in emission order
    pub fn domain_events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Remove and return all pending events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    // Raises the status when a threshold is crossed; never lowers it.
    // Events fire only on the transition, not on every expense.
    fn update_status(&mut self) {
        let usage = self.usage_percentage();
        let previous = self.status;

        if usage >= 1.0 {
            self.status = BudgetStatus::Exceeded;
            if previous != BudgetStatus::Exceeded {
                self.events.push(DomainEvent::BudgetExceeded {
                    budget_id: self.id,
                    limit: self.limit,
                    spent: self.spent,
                    occurred_at: Utc::now(),
                });
            }
        } else if usage >= Self::WARNING_THRESHOLD {
            self.status = BudgetStatus::Warning;
            if previous == BudgetStatus::OnTrack {
                self.events.push(DomainEvent::BudgetWarningReached {
                    budget_id: self.id,
                    percentage: usage,
                    occurred_at: Utc::now(),
                });
            }
        }
    }
}
