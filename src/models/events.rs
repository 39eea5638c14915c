//! Domain events emitted by the aggregates
//!
//! Events are plain values in one closed enum, so consumers match on them
//! exhaustively. Aggregates buffer the events they emit; the service layer
//! drains each buffer once per successful command and hands the events to
//! whatever dispatch the embedding application provides.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::account::AccountType;
use super::ids::{AccountId, BudgetId, CategoryId, TransactionId};
use super::money::Money;
use super::transaction::{ConfidenceLevel, TransactionType};

/// Everything that can happen in the domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A new account was opened
    AccountCreated {
        account_id: AccountId,
        name: String,
        account_type: AccountType,
        occurred_at: DateTime<Utc>,
    },

    /// An account balance moved, by credit or debit
    AccountBalanceUpdated {
        account_id: AccountId,
        previous_balance: Money,
        new_balance: Money,
        occurred_at: DateTime<Utc>,
    },

    /// A transaction was recorded
    TransactionCreated {
        transaction_id: TransactionId,
        account_id: AccountId,
        amount: Money,
        transaction_type: TransactionType,
        date: NaiveDate,
        occurred_at: DateTime<Utc>,
    },

    /// A transaction was assigned to a category
    TransactionCategorized {
        transaction_id: TransactionId,
        category_id: CategoryId,
        confidence: ConfidenceLevel,
        occurred_at: DateTime<Utc>,
    },

    /// A budget crossed the warning threshold
    BudgetWarningReached {
        budget_id: BudgetId,
        /// Usage at the time of the event, as a ratio of the limit
        percentage: f64,
        occurred_at: DateTime<Utc>,
    },

    /// A budget's spending reached or passed its limit
    BudgetExceeded {
        budget_id: BudgetId,
        limit: Money,
        spent: Money,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// When the event occurred
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::AccountCreated { occurred_at, .. }
            | Self::AccountBalanceUpdated { occurred_at, .. }
            | Self::TransactionCreated { occurred_at, .. }
            | Self::TransactionCategorized { occurred_at, .. }
            | Self::BudgetWarningReached { occurred_at, .. }
            | Self::BudgetExceeded { occurred_at, .. } => *occurred_at,
        }
    }
}
