//! Service layer
//!
//! The service layer provides command orchestration on top of the storage
//! ports: it loads aggregates, applies commands, and persists the outcome.
//! State-changing commands return a [`CommandResult`] carrying the updated
//! aggregate together with the events the command raised.

pub mod account;
pub mod budget;
pub mod category;
pub mod transaction;

pub use account::AccountService;
pub use budget::BudgetService;
pub use category::CategoryService;
pub use transaction::TransactionService;

use crate::models::DomainEvent;

/// Outcome of a state-changing command
///
/// Events are drained from the aggregate exactly once, before the save, so
/// they appear here and nowhere else. A failed command surfaces no events.
#[derive(Debug, Clone)]
pub struct CommandResult<T> {
    /// The aggregate after the command
    pub state: T,
    /// Events the command raised, in emission order
    pub events: Vec<DomainEvent>,
}
