//! Fiscus - personal finance bookkeeping core
//!
//! This library provides the domain model for a personal finance application:
//! accounts with running balances, income and expense transactions, a
//! category catalog, and monthly budgets that warn as spending approaches
//! the limit. State changes raise domain events so callers can react to
//! them without polling.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, categories, budgets)
//! - `storage`: Persistence ports and in-memory adapters
//! - `services`: Command orchestration on top of the ports
//!
//! # Example
//!
//! ```rust
//! use fiscus::models::{AccountType, Currency, Money};
//! use fiscus::services::AccountService;
//! use fiscus::storage::InMemoryAccountRepository;
//! use rust_decimal_macros::dec;
//!
//! let accounts = InMemoryAccountRepository::new();
//! let service = AccountService::new(&accounts);
//!
//! let created = service.create("Everyday", AccountType::Checking, Currency::EUR)?;
//! let funded = service.credit(created.state.id(), Money::new(dec!(250), Currency::EUR))?;
//!
//! assert_eq!(funded.state.balance().amount(), Money::new(dec!(250), Currency::EUR));
//! assert_eq!(funded.events.len(), 1);
//! # Ok::<(), fiscus::DomainError>(())
//! ```

pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{DomainError, DomainResult};
