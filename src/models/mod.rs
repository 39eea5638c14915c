//! Core data models
//!
//! This module contains all the data structures that represent the personal
//! finance domain: accounts, transactions, categories, monthly budgets, and
//! the events they emit.

pub mod account;
pub mod budget;
pub mod category;
pub mod events;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use account::{Account, AccountType, Balance};
pub use budget::{Budget, BudgetStatus};
pub use category::{Category, CategoryType};
pub use events::DomainEvent;
pub use ids::{AccountId, BudgetId, CategoryId, TransactionId};
pub use money::{Currency, Money};
pub use period::BudgetPeriod;
pub use transaction::{ConfidenceLevel, Transaction, TransactionType};
