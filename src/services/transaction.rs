//! Transaction service
//!
//! Records transactions and applies their balance effect to the owning
//! account in one command: income credits, expenses debit, transfers leave
//! the balance alone. Also handles categorization and the read queries.

use chrono::NaiveDate;

use crate::error::{DomainError, DomainResult};
use crate::models::{
    AccountId, CategoryId, ConfidenceLevel, Money, Transaction, TransactionId, TransactionType,
};
use crate::storage::{AccountRepository, CategoryRepository, TransactionRepository};

use super::CommandResult;

/// Service for recording and categorizing transactions
pub struct TransactionService<'a> {
    transactions: &'a dyn TransactionRepository,
    accounts: &'a dyn AccountRepository,
    categories: &'a dyn CategoryRepository,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(
        transactions: &'a dyn TransactionRepository,
        accounts: &'a dyn AccountRepository,
        categories: &'a dyn CategoryRepository,
    ) -> Self {
        Self {
            transactions,
            accounts,
            categories,
        }
    }

    /// Record a transaction and apply it to the account balance
    ///
    /// Nothing is persisted unless the whole command succeeds, so a debit
    /// that would overdraw the account leaves both stores untouched.
    pub fn record(
        &self,
        account_id: AccountId,
        amount: Money,
        description: &str,
        date: NaiveDate,
        transaction_type: TransactionType,
    ) -> DomainResult<CommandResult<Transaction>> {
        let mut account = self
            .accounts
            .find_by_id(account_id)?
            .ok_or_else(|| DomainError::not_found("Account", account_id))?;

        let mut transaction =
            Transaction::create(account_id, amount, description, date, transaction_type)?;

        match transaction_type {
            TransactionType::Income => account.credit(amount)?,
            TransactionType::Expense => account.debit(amount)?,
            // TODO: post the matching leg once transfers carry a counterparty account
            TransactionType::Transfer => {}
        }

        let mut events = transaction.take_events();
        events.extend(account.take_events());

        self.transactions.save(transaction.clone())?;
        self.accounts.save(account)?;

        Ok(CommandResult {
            state: transaction,
            events,
        })
    }

    /// Assign a transaction to a category
    pub fn categorize(
        &self,
        transaction_id: TransactionId,
        category_id: CategoryId,
        confidence: ConfidenceLevel,
    ) -> DomainResult<CommandResult<Transaction>> {
        let mut transaction = self
            .transactions
            .find_by_id(transaction_id)?
            .ok_or_else(|| DomainError::not_found("Transaction", transaction_id))?;

        if self.categories.find_by_id(category_id)?.is_none() {
            return Err(DomainError::not_found("Category", category_id));
        }

        transaction.categorize(category_id, confidence);

        let events = transaction.take_events();
        self.transactions.save(transaction.clone())?;

        Ok(CommandResult {
            state: transaction,
            events,
        })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> DomainResult<Transaction> {
        self.transactions
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Transaction", id))
    }

    /// Get all transactions for an account, oldest first
    pub fn for_account(&self, account_id: AccountId) -> DomainResult<Vec<Transaction>> {
        self.transactions.find_by_account_id(account_id)
    }

    /// Get an account's transactions dated within `[start, end]`
    pub fn for_account_between(
        &self,
        account_id: AccountId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Transaction>> {
        self.transactions
            .find_by_account_id_and_date_between(account_id, start, end)
    }

    /// Get all transactions dated within `[start, end]`
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> DomainResult<Vec<Transaction>> {
        self.transactions.find_by_date_between(start, end)
    }

    /// Get all transactions assigned to a category
    pub fn for_category(&self, category_id: CategoryId) -> DomainResult<Vec<Transaction>> {
        self.transactions.find_by_category_id(category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Category, CategoryType, Currency, DomainEvent};
    use crate::storage::{
        InMemoryAccountRepository, InMemoryCategoryRepository, InMemoryTransactionRepository,
    };
    use rust_decimal_macros::dec;

    struct Fixture {
        transactions: InMemoryTransactionRepository,
        accounts: InMemoryAccountRepository,
        categories: InMemoryCategoryRepository,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                transactions: InMemoryTransactionRepository::new(),
                accounts: InMemoryAccountRepository::new(),
                categories: InMemoryCategoryRepository::new(),
            }
        }

        fn service(&self) -> TransactionService<'_> {
            TransactionService::new(&self.transactions, &self.accounts, &self.categories)
        }

        fn account_with(&self, balance: Money) -> AccountId {
            let mut account =
                Account::create("Everyday", AccountType::Checking, Currency::EUR).unwrap();
            if balance.is_positive() {
                account.credit(balance).unwrap();
            }
            account.take_events();
            let id = account.id();
            self.accounts.save(account).unwrap();
            id
        }

        fn category(&self, name: &str) -> CategoryId {
            let category = Category::create(name, CategoryType::Expense, "#FF5733", None).unwrap();
            let id = category.id();
            self.categories.save(category).unwrap();
            id
        }
    }

    fn eur(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::EUR)
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn test_record_income_credits_the_account() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let account_id = fixture.account_with(eur(dec!(0)));

        let result = service
            .record(
                account_id,
                eur(dec!(1000)),
                "Salary",
                march(1),
                TransactionType::Income,
            )
            .unwrap();

        assert_eq!(result.state.transaction_type(), TransactionType::Income);
        let account = fixture.accounts.find_by_id(account_id).unwrap().unwrap();
        assert_eq!(account.balance().amount(), eur(dec!(1000)));

        // Transaction event first, then the balance event
        assert_eq!(result.events.len(), 2);
        assert!(matches!(result.events[0], DomainEvent::TransactionCreated { .. }));
        assert!(matches!(
            result.events[1],
            DomainEvent::AccountBalanceUpdated { .. }
        ));
    }

    #[test]
    fn test_record_expense_debits_the_account() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let account_id = fixture.account_with(eur(dec!(500)));

        service
            .record(
                account_id,
                eur(dec!(200)),
                "Groceries",
                march(2),
                TransactionType::Expense,
            )
            .unwrap();

        let account = fixture.accounts.find_by_id(account_id).unwrap().unwrap();
        assert_eq!(account.balance().amount(), eur(dec!(300)));
    }

    #[test]
    fn test_record_transfer_leaves_the_balance_alone() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let account_id = fixture.account_with(eur(dec!(500)));

        let result = service
            .record(
                account_id,
                eur(dec!(100)),
                "To savings",
                march(3),
                TransactionType::Transfer,
            )
            .unwrap();

        let account = fixture.accounts.find_by_id(account_id).unwrap().unwrap();
        assert_eq!(account.balance().amount(), eur(dec!(500)));

        // Only the creation event; no balance change happened
        assert_eq!(result.events.len(), 1);
        assert!(matches!(result.events[0], DomainEvent::TransactionCreated { .. }));
    }

    #[test]
    fn test_failed_debit_persists_nothing() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let account_id = fixture.account_with(eur(dec!(100)));

        let result = service.record(
            account_id,
            eur(dec!(250)),
            "Too expensive",
            march(4),
            TransactionType::Expense,
        );
        assert!(matches!(result, Err(DomainError::InsufficientFunds { .. })));

        let account = fixture.accounts.find_by_id(account_id).unwrap().unwrap();
        assert_eq!(account.balance().amount(), eur(dec!(100)));
        assert!(service.for_account(account_id).unwrap().is_empty());
    }

    #[test]
    fn test_record_for_unknown_account_is_not_found() {
        let fixture = Fixture::new();
        let service = fixture.service();

        let err = service
            .record(
                AccountId::new(),
                eur(dec!(10)),
                "Ghost",
                march(5),
                TransactionType::Expense,
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_categorize_transaction() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let account_id = fixture.account_with(eur(dec!(500)));
        let category_id = fixture.category("Groceries");

        let transaction_id = service
            .record(
                account_id,
                eur(dec!(50)),
                "Market",
                march(6),
                TransactionType::Expense,
            )
            .unwrap()
            .state
            .id();

        let result = service
            .categorize(transaction_id, category_id, ConfidenceLevel::Manual)
            .unwrap();

        assert_eq!(result.state.category_id(), Some(category_id));
        assert_eq!(result.state.confidence(), Some(ConfidenceLevel::Manual));
        assert_eq!(result.events.len(), 1);
        assert!(matches!(
            result.events[0],
            DomainEvent::TransactionCategorized { .. }
        ));

        let stored = service.get(transaction_id).unwrap();
        assert_eq!(stored.category_id(), Some(category_id));
        assert!(stored.domain_events().is_empty());
    }

    #[test]
    fn test_categorize_with_unknown_category_is_not_found() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let account_id = fixture.account_with(eur(dec!(500)));

        let transaction_id = service
            .record(
                account_id,
                eur(dec!(50)),
                "Market",
                march(7),
                TransactionType::Expense,
            )
            .unwrap()
            .state
            .id();

        let err = service
            .categorize(transaction_id, CategoryId::new(), ConfidenceLevel::High)
            .unwrap_err();
        assert!(err.is_not_found());

        // Transaction untouched
        assert!(service.get(transaction_id).unwrap().category_id().is_none());
    }

    #[test]
    fn test_categorize_unknown_transaction_is_not_found() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let category_id = fixture.category("Groceries");

        let err = service
            .categorize(TransactionId::new(), category_id, ConfidenceLevel::Low)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_read_queries() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let account_id = fixture.account_with(eur(dec!(1000)));
        let category_id = fixture.category("Groceries");

        let first = service
            .record(
                account_id,
                eur(dec!(20)),
                "Early",
                march(1),
                TransactionType::Expense,
            )
            .unwrap()
            .state
            .id();
        service
            .record(
                account_id,
                eur(dec!(30)),
                "Late",
                march(25),
                TransactionType::Expense,
            )
            .unwrap();

        service
            .categorize(first, category_id, ConfidenceLevel::High)
            .unwrap();

        assert_eq!(service.for_account(account_id).unwrap().len(), 2);
        assert_eq!(
            service
                .for_account_between(account_id, march(1), march(10))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(service.between(march(1), march(31)).unwrap().len(), 2);
        assert_eq!(service.for_category(category_id).unwrap().len(), 1);
    }
}
