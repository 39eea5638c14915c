//! Account service
//!
//! Orchestrates account commands: loads the aggregate, applies the command,
//! drains its events, and persists the result.

use crate::error::{DomainError, DomainResult};
use crate::models::{Account, AccountId, AccountType, Currency, Money};
use crate::storage::AccountRepository;

use super::CommandResult;

/// Service for account management
pub struct AccountService<'a> {
    accounts: &'a dyn AccountRepository,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(accounts: &'a dyn AccountRepository) -> Self {
        Self { accounts }
    }

    /// Open a new account
    pub fn create(
        &self,
        name: &str,
        account_type: AccountType,
        currency: Currency,
    ) -> DomainResult<CommandResult<Account>> {
        let mut account = Account::create(name, account_type, currency)?;

        let events = account.take_events();
        self.accounts.save(account.clone())?;

        Ok(CommandResult {
            state: account,
            events,
        })
    }

    /// Add money to an account
    pub fn credit(&self, id: AccountId, amount: Money) -> DomainResult<CommandResult<Account>> {
        let mut account = self.load(id)?;
        account.credit(amount)?;

        let events = account.take_events();
        self.accounts.save(account.clone())?;

        Ok(CommandResult {
            state: account,
            events,
        })
    }

    /// Take money out of an account
    pub fn debit(&self, id: AccountId, amount: Money) -> DomainResult<CommandResult<Account>> {
        let mut account = self.load(id)?;
        account.debit(amount)?;

        let events = account.take_events();
        self.accounts.save(account.clone())?;

        Ok(CommandResult {
            state: account,
            events,
        })
    }

    /// Close an account; its balance must be zero
    pub fn close(&self, id: AccountId) -> DomainResult<CommandResult<Account>> {
        let mut account = self.load(id)?;
        account.close()?;

        let events = account.take_events();
        self.accounts.save(account.clone())?;

        Ok(CommandResult {
            state: account,
            events,
        })
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> DomainResult<Account> {
        self.load(id)
    }

    /// Get all accounts, sorted by name
    pub fn list(&self) -> DomainResult<Vec<Account>> {
        self.accounts.find_all()
    }

    fn load(&self, id: AccountId) -> DomainResult<Account> {
        self.accounts
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Account", id))
    }
}
