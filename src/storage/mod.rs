//! Storage layer
//!
//! Persistence ports for the domain aggregates, one trait per aggregate,
//! together with in-memory adapters backed by `RwLock<HashMap>`. Services
//! depend only on the traits, so swapping the adapter never touches them.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod transactions;

pub use accounts::{AccountRepository, InMemoryAccountRepository};
pub use budgets::{BudgetRepository, InMemoryBudgetRepository};
pub use categories::{CategoryRepository, InMemoryCategoryRepository};
pub use transactions::{InMemoryTransactionRepository, TransactionRepository};
