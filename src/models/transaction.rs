//! Transaction aggregate
//!
//! A transaction records money moving on an account at a point in time. The
//! amount and description are fixed at creation; only the category
//! assignment can change afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

use super::events::DomainEvent;
use super::ids::{AccountId, CategoryId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
    /// Movement between own accounts
    Transfer,
}

impl TransactionType {
    /// Parse a transaction type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// How confident the categorization was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    /// Assigned by hand
    Manual,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
            Self::Manual => write!(f, "Manual"),
        }
    }
}

/// A single movement of money on an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    id: TransactionId,

    /// Account this transaction belongs to
    account_id: AccountId,

    /// Amount moved, always positive; the type carries the direction
    amount: Money,

    /// What this transaction was for
    description: String,

    /// Date the transaction took place
    date: NaiveDate,

    /// Direction of the movement
    #[serde(rename = "type")]
    transaction_type: TransactionType,

    /// Category assigned to this transaction, if any
    category_id: Option<CategoryId>,

    /// Confidence of the category assignment
    confidence: Option<ConfidenceLevel>,

    /// When the transaction was recorded
    created_at: DateTime<Utc>,

    /// Events emitted since the last drain
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Transaction {
    /// Record a new transaction, uncategorized
    pub fn create(
        account_id: AccountId,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
        transaction_type: TransactionType,
    ) -> DomainResult<Self> {
        if !amount.is_positive() {
            return Err(DomainError::invalid_argument(format!(
                "Transaction amount must be positive, got: {amount}"
            )));
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "Transaction description must not be blank",
            ));
        }

        let id = TransactionId::new();
        let mut transaction = Self {
            id,
            account_id,
            amount,
            description,
            date,
            transaction_type,
            category_id: None,
            confidence: None,
            created_at: Utc::now(),
            events: Vec::new(),
        };
        transaction.events.push(DomainEvent::TransactionCreated {
            transaction_id: id,
            account_id,
            amount,
            transaction_type,
            date,
            occurred_at: Utc::now(),
        });
        Ok(transaction)
    }

    /// Assign a category, overwriting any previous assignment
    pub fn categorize(&mut self, category_id: CategoryId, confidence: ConfidenceLevel) {
        self.category_id = Some(category_id);
        self.confidence = Some(confidence);
        self.events.push(DomainEvent::TransactionCategorized {
            transaction_id: self.id,
            category_id,
            confidence,
            occurred_at: Utc::now(),
        });
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    pub fn confidence(&self) -> Option<ConfidenceLevel> {
        self.confidence
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_categorized(&self) -> bool {
        self.category_id.is_some()
    }

    /// Events emitted since the last drain, in emission order
    pub fn domain_events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Remove and return all pending events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn eur(amount: Decimal) -> Money {
        Money::new(amount, Currency::EUR)
    }

    fn groceries() -> Transaction {
        Transaction::create(
            AccountId::new(),
            eur(dec!(42.50)),
            "Groceries",
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            TransactionType::Expense,
        )
        .unwrap()
    }

    #[test]
    fn test_create_transaction() {
        let transaction = groceries();

        assert_eq!(transaction.amount(), eur(dec!(42.50)));
        assert_eq!(transaction.description(), "Groceries");
        assert_eq!(transaction.transaction_type(), TransactionType::Expense);
        assert!(!transaction.is_categorized());
        assert_eq!(transaction.category_id(), None);
        assert_eq!(transaction.confidence(), None);

        assert_eq!(transaction.domain_events().len(), 1);
        assert!(matches!(
            &transaction.domain_events()[0],
            DomainEvent::TransactionCreated { transaction_id, amount, transaction_type, .. }
                if *transaction_id == transaction.id()
                    && *amount == eur(dec!(42.50))
                    && *transaction_type == TransactionType::Expense
        ));
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        let result = Transaction::create(
            AccountId::new(),
            eur(dec!(0)),
            "Nothing",
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            TransactionType::Expense,
        );
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));

        let result = Transaction::create(
            AccountId::new(),
            eur(dec!(-10)),
            "Refund",
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            TransactionType::Income,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_rejects_blank_description() {
        let result = Transaction::create(
            AccountId::new(),
            eur(dec!(10)),
            "   ",
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            TransactionType::Expense,
        );
        assert_eq!(
            result.unwrap_err(),
            DomainError::invalid_argument("Transaction description must not be blank")
        );
    }

    #[test]
    fn test_categorize_sets_fields_and_emits_event() {
        let mut transaction = groceries();
        transaction.take_events();

        let category_id = CategoryId::new();
        transaction.categorize(category_id, ConfidenceLevel::High);

        assert!(transaction.is_categorized());
        assert_eq!(transaction.category_id(), Some(category_id));
        assert_eq!(transaction.confidence(), Some(ConfidenceLevel::High));
        assert!(matches!(
            &transaction.domain_events()[0],
            DomainEvent::TransactionCategorized { category_id: event_category, confidence, .. }
                if *event_category == category_id && *confidence == ConfidenceLevel::High
        ));
    }

    #[test]
    fn test_recategorize_overwrites_previous_assignment() {
        let mut transaction = groceries();
        let first = CategoryId::new();
        let second = CategoryId::new();

        transaction.categorize(first, ConfidenceLevel::Low);
        transaction.categorize(second, ConfidenceLevel::Manual);

        assert_eq!(transaction.category_id(), Some(second));
        assert_eq!(transaction.confidence(), Some(ConfidenceLevel::Manual));

        // One created event plus one per categorization
        assert_eq!(transaction.domain_events().len(), 3);
    }

    #[test]
    fn test_direction_predicates() {
        let expense = groceries();
        assert!(expense.is_expense());
        assert!(!expense.is_income());

        let income = Transaction::create(
            AccountId::new(),
            eur(dec!(2500)),
            "Salary",
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            TransactionType::Income,
        )
        .unwrap();
        assert!(income.is_income());
        assert!(!income.is_expense());

        let transfer = Transaction::create(
            AccountId::new(),
            eur(dec!(100)),
            "To savings",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            TransactionType::Transfer,
        )
        .unwrap();
        assert!(!transfer.is_income());
        assert!(!transfer.is_expense());
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!(TransactionType::parse("income"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse("EXPENSE"), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("loan"), None);
    }
}
