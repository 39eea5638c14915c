//! Account aggregate and its value objects
//!
//! An account holds a running balance in a single currency. Money can only
//! move through `credit` and `debit`, which validate before touching any
//! state and record the events they emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

use super::events::DomainEvent;
use super::ids::AccountId;
use super::money::{Currency, Money};

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Checking account
    Checking,
    /// Savings account
    Savings,
    /// Credit card
    CreditCard,
    /// Cash/wallet
    Cash,
}

impl AccountType {
    /// Parse an account type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit_card" | "creditcard" | "credit" => Some(Self::CreditCard),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Cash => write!(f, "Cash"),
        }
    }
}

/// Running balance of an account
///
/// Credits and debits return a new balance and never mutate the original.
/// A balance may go negative at this level; solvency is the account's rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(Money);

impl Balance {
    /// Wrap a money value as a balance
    pub fn new(amount: Money) -> Self {
        Self(amount)
    }

    /// Zero balance in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self(Money::zero(currency))
    }

    /// The balance as a money value
    pub fn amount(&self) -> Money {
        self.0
    }

    /// A new balance increased by a strictly positive amount
    pub fn credit(&self, amount: Money) -> DomainResult<Balance> {
        Self::require_positive(amount)?;
        Ok(Self(self.0.add(amount)?))
    }

    /// A new balance decreased by a strictly positive amount
    pub fn debit(&self, amount: Money) -> DomainResult<Balance> {
        Self::require_positive(amount)?;
        Ok(Self(self.0.subtract(amount)?))
    }

    /// Whether debiting the amount keeps the balance non-negative
    pub fn can_debit(&self, amount: Money) -> DomainResult<bool> {
        Ok(!self.0.subtract(amount)?.is_negative())
    }

    fn require_positive(amount: Money) -> DomainResult<()> {
        if !amount.is_positive() {
            return Err(DomainError::invalid_argument(format!(
                "Amount must be positive, got: {amount}"
            )));
        }
        Ok(())
    }
}

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    id: AccountId,

    /// Account name (e.g., "Everyday Checking")
    name: String,

    /// Type of account
    #[serde(rename = "type")]
    account_type: AccountType,

    /// Currency every amount on this account must use
    currency: Currency,

    /// Current balance
    balance: Balance,

    /// Whether the account has been closed
    closed: bool,

    /// When the account was created
    created_at: DateTime<Utc>,

    /// Events emitted since the last drain
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Account {
    /// Open a new account with a zero balance
    pub fn create(
        name: impl Into<String>,
        account_type: AccountType,
        currency: Currency,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "Account name must not be blank",
            ));
        }

        let id = AccountId::new();
        let mut account = Self {
            id,
            name,
            account_type,
            currency,
            balance: Balance::zero(currency),
            closed: false,
            created_at: Utc::now(),
            events: Vec::new(),
        };
        account.events.push(DomainEvent::AccountCreated {
            account_id: id,
            name: account.name.clone(),
            account_type,
            occurred_at: Utc::now(),
        });
        Ok(account)
    }

    /// Add money to the account
    pub fn credit(&mut self, amount: Money) -> DomainResult<()> {
        self.require_open()?;
        self.require_same_currency(amount)?;

        let previous = self.balance;
        self.balance = self.balance.credit(amount)?;
        self.record_balance_updated(previous);
        Ok(())
    }

    /// Take money out of the account
    ///
    /// Fails with [`DomainError::InsufficientFunds`] when the debit would
    /// take the balance below zero; debiting the exact balance is allowed.
    pub fn debit(&mut self, amount: Money) -> DomainResult<()> {
        self.require_open()?;
        self.require_same_currency(amount)?;

        if !self.balance.can_debit(amount)? {
            return Err(DomainError::InsufficientFunds {
                balance: self.balance.amount(),
                requested: amount,
            });
        }

        let previous = self.balance;
        self.balance = self.balance.debit(amount)?;
        self.record_balance_updated(previous);
        Ok(())
    }

    /// Close the account
    ///
    /// Only an open account with a zero balance can be closed. Emits no event.
    pub fn close(&mut self) -> DomainResult<()> {
        if self.closed {
            return Err(DomainError::invalid_state("Account is already closed"));
        }
        if !self.balance.amount().is_zero() {
            return Err(DomainError::invalid_state(format!(
                "Cannot close account with non-zero balance: {}",
                self.balance.amount()
            )));
        }
        self.closed = true;
        Ok(())
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn is_closed(&self) -> bool {
        self.closed
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

    fn require_open(&self) -> DomainResult<()> {
        if self.closed {
            return Err(DomainError::invalid_state(
                "Cannot operate on a closed account",
            ));
        }
        Ok(())
    }

    fn require_same_currency(&self, amount: Money) -> DomainResult<()> {
        if amount.currency() != self.currency {
            return Err(DomainError::CurrencyMismatch {
                expected: self.currency,
                actual: amount.currency(),
            });
        }
        Ok(())
    }

    fn record_balance_updated(&mut self, previous: Balance) {
        self.events.push(DomainEvent::AccountBalanceUpdated {
            account_id: self.id,
            previous_balance: previous.amount(),
            new_balance: self.balance.amount(),
            occurred_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn eur(amount: Decimal) -> Money {
        Money::new(amount, Currency::EUR)
    }

    fn open_account() -> Account {
        Account::create("Main", AccountType::Checking, Currency::EUR).unwrap()
    }

    #[test]
    fn test_create_account() {
        let account = open_account();

        assert_eq!(account.name(), "Main");
        assert_eq!(account.account_type(), AccountType::Checking);
        assert_eq!(account.currency(), Currency::EUR);
        assert!(account.balance().amount().is_zero());
        assert!(!account.is_closed());

        assert_eq!(account.domain_events().len(), 1);
        assert!(matches!(
            &account.domain_events()[0],
            DomainEvent::AccountCreated { account_id, name, account_type, .. }
                if *account_id == account.id()
                    && name == "Main"
                    && *account_type == AccountType::Checking
        ));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let err = Account::create("", AccountType::Cash, Currency::EUR).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_argument("Account name must not be blank")
        );

        assert!(Account::create("   ", AccountType::Cash, Currency::EUR).is_err());
    }

    #[test]
    fn test_credit_updates_balance_and_emits_event() {
        let mut account = open_account();
        account.take_events();

        account.credit(eur(dec!(100))).unwrap();

        assert_eq!(account.balance().amount(), eur(dec!(100)));
        assert_eq!(account.domain_events().len(), 1);
        assert!(matches!(
            &account.domain_events()[0],
            DomainEvent::AccountBalanceUpdated { previous_balance, new_balance, .. }
                if *previous_balance == eur(dec!(0)) && *new_balance == eur(dec!(100))
        ));
    }

    #[test]
    fn test_credit_rejects_non_positive_amounts() {
        let mut account = open_account();

        assert!(account.credit(eur(dec!(0))).is_err());
        assert!(account.credit(eur(dec!(-5))).is_err());
        assert!(account.balance().amount().is_zero());
    }

    #[test]
    fn test_credit_rejects_currency_mismatch() {
        let mut account = open_account();
        account.take_events();

        let err = account.credit(Money::new(dec!(10), Currency::USD)).unwrap_err();

        assert_eq!(
            err,
            DomainError::CurrencyMismatch {
                expected: Currency::EUR,
                actual: Currency::USD,
            }
        );
        // A failed command leaves the account untouched
        assert!(account.balance().amount().is_zero());
        assert!(account.domain_events().is_empty());
    }

    #[test]
    fn test_debit_updates_balance() {
        let mut account = open_account();
        account.credit(eur(dec!(100))).unwrap();

        account.debit(eur(dec!(40))).unwrap();

        assert_eq!(account.balance().amount(), eur(dec!(60)));
    }

    #[test]
    fn test_debit_rejects_insufficient_funds() {
        let mut account = open_account();
        account.credit(eur(dec!(50))).unwrap();
        account.take_events();

        let err = account.debit(eur(dec!(100))).unwrap_err();

        assert_eq!(
            err,
            DomainError::InsufficientFunds {
                balance: eur(dec!(50)),
                requested: eur(dec!(100)),
            }
        );
        assert_eq!(account.balance().amount(), eur(dec!(50)));
        assert!(account.domain_events().is_empty());
    }

    #[test]
    fn test_debit_entire_balance_is_allowed() {
        let mut account = open_account();
        account.credit(eur(dec!(75))).unwrap();

        account.debit(eur(dec!(75))).unwrap();

        assert!(account.balance().amount().is_zero());
    }

    #[test]
    fn test_closed_account_rejects_operations() {
        let mut account = open_account();
        account.close().unwrap();

        let err = account.credit(eur(dec!(10))).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_state("Cannot operate on a closed account")
        );
        assert!(account.debit(eur(dec!(10))).is_err());
    }

    #[test]
    fn test_close_rejects_non_zero_balance() {
        let mut account = open_account();
        account.credit(eur(dec!(25))).unwrap();

        let err = account.close().unwrap_err();

        assert!(matches!(err, DomainError::InvalidState(_)));
        assert!(!account.is_closed());
    }

    #[test]
    fn test_close_twice_rejected() {
        let mut account = open_account();
        account.close().unwrap();

        let err = account.close().unwrap_err();
        assert_eq!(err, DomainError::invalid_state("Account is already closed"));
    }

    #[test]
    fn test_close_emits_no_event() {
        let mut account = open_account();
        account.take_events();

        account.close().unwrap();

        assert!(account.domain_events().is_empty());
    }

    #[test]
    fn test_take_events_drains_once() {
        let mut account = open_account();
        account.credit(eur(dec!(10))).unwrap();

        let events = account.take_events();
        assert_eq!(events.len(), 2);

        assert!(account.take_events().is_empty());
        assert!(account.domain_events().is_empty());
    }

    #[test]
    fn test_balance_permits_overdraft_at_value_level() {
        let balance = Balance::zero(Currency::EUR);

        let overdrawn = balance.debit(eur(dec!(10))).unwrap();

        assert!(overdrawn.amount().is_negative());
        assert!(!balance.can_debit(eur(dec!(10))).unwrap());
        assert!(Balance::new(eur(dec!(10))).can_debit(eur(dec!(10))).unwrap());
    }

    #[test]
    fn test_account_type_parse() {
        assert_eq!(AccountType::parse("checking"), Some(AccountType::Checking));
        assert_eq!(AccountType::parse("CREDIT_CARD"), Some(AccountType::CreditCard));
        assert_eq!(AccountType::parse("margin"), None);
    }
}
