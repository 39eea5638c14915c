//! Money value object and supported currencies
//!
//! Amounts are exact decimals, stored rounded to two decimal places. All
//! arithmetic returns new values; combining two currencies is an error, not
//! a conversion.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Currencies the ledger supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    EUR,
    USD,
    GBP,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
        }
    }

    /// Parse a currency from its ISO code
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "EUR" => Some(Self::EUR),
            "USD" => Some(Self::USD),
            "GBP" => Some(Self::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An amount of money in a specific currency
///
/// Construction rounds to two decimal places (half away from zero), so two
/// values that represent the same amount always compare equal. Operations
/// never mutate their operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Create a money value, rounding the amount to cents
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        Self { amount, currency }
    }

    /// Zero in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// The rounded amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency of this value
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Sum of two values in the same currency
    pub fn add(&self, other: Money) -> DomainResult<Money> {
        self.require_same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Difference of two values in the same currency
    pub fn subtract(&self, other: Money) -> DomainResult<Money> {
        self.require_same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// The same amount with its sign flipped
    pub fn negate(&self) -> Money {
        Self::new(-self.amount, self.currency)
    }

    /// Strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Exactly zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Whether this value is strictly greater than another in the same currency
    pub fn is_greater_than(&self, other: Money) -> DomainResult<bool> {
        self.require_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    /// The amount as a float ratio of another value, for percentage math
    pub(crate) fn ratio_of(&self, other: Money) -> f64 {
        if other.amount.is_zero() {
            return 0.0;
        }
        (self.amount / other.amount).to_f64().unwrap_or(0.0)
    }

    fn require_same_currency(&self, other: Money) -> DomainResult<()> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                expected: self.currency,
                actual: other.currency,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
