//! Error types for the fiscus domain core
//!
//! Every fallible operation in the crate surfaces a [`DomainError`], so
//! callers can match on a closed set of failure kinds instead of parsing
//! message strings.

use thiserror::Error;

use crate::models::{Currency, Money};

/// Result type alias used throughout fiscus
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure kinds raised by the domain model and the service layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A command argument failed validation
    #[error("{0}")]
    InvalidArgument(String),

    /// The command conflicts with the current state of an aggregate
    #[error("{0}")]
    InvalidState(String),

    /// A debit would take the balance below zero
    #[error("Insufficient funds: balance is {balance}, tried to debit {requested}")]
    InsufficientFunds { balance: Money, requested: Money },

    /// Money values in two different currencies were combined
    #[error("Expected currency {expected} but got {actual}")]
    CurrencyMismatch { expected: Currency, actual: Currency },

    /// A repository lookup came back empty
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A repository backend failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Build a [`DomainError::InvalidArgument`] from any message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Build a [`DomainError::InvalidState`] from any message
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Build a [`DomainError::NotFound`] for an entity and its identifier
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether this error is a missing-entity lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
