//! Account domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::money::{Currency, Money};
use super::user::UserId;
use crate::error::LedgerError;

/// Unique identifier for an Account.
///
/// Ids are totally ordered; the ledger engine relies on this to acquire
/// account locks in a consistent order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Creates a new random AccountId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AccountId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A single-currency balance bucket owned by one user.
///
/// A user holds at most one account per currency; the balance is mutated
/// only by the ledger engine during transfers or by administrator
/// overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Owning user
    pub user_id: UserId,
    /// Current balance (includes currency information)
    pub balance: Money,
}

impl Account {
    /// Creates a new account with zero balance.
    pub fn new(user_id: UserId, currency: Currency) -> Self {
        Self {
            id: AccountId::new(),
            user_id,
            balance: Money::zero(currency),
        }
    }

    /// Creates an account with all fields specified (for store reconstruction).
    pub fn from_parts(id: AccountId, user_id: UserId, balance: Money) -> Self {
        Self {
            id,
            user_id,
            balance,
        }
    }

    /// Returns the currency of this account.
    pub fn currency(&self) -> Currency {
        self.balance.currency()
    }

    /// Credits (adds) money to the account.
    pub fn credit(&mut self, amount: Money) -> Result<(), LedgerError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AccountNotFound)?;
        Ok(())
    }

    /// Debits (subtracts) money from the account.
    pub fn debit(&mut self, amount: Money) -> Result<(), LedgerError> {
        if amount.currency() != self.currency() {
            return Err(LedgerError::AccountNotFound);
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::AccountHasNotEnoughAmountForPayment)?;
        Ok(())
    }

    /// Checks if the account can cover a debit of `amount`.
    pub fn has_sufficient_funds(&self, amount: &Money) -> bool {
        self.balance.gte(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_creation() {
        let owner = UserId::new();
        let account = Account::new(owner, Currency::EUR);
        assert_eq!(account.user_id, owner);
        assert_eq!(account.balance.amount(), 0);
        assert_eq!(account.currency(), Currency::EUR);
    }

    #[test]
    fn test_account_credit() {
        let mut account = Account::new(UserId::new(), Currency::EUR);
        account.credit(Money::new(1000, Currency::EUR)).unwrap();
        assert_eq!(account.balance.amount(), 1000);
    }

    #[test]
    fn test_account_debit() {
        let mut account = Account::new(UserId::new(), Currency::EUR);
        account.credit(Money::new(1000, Currency::EUR)).unwrap();
        account.debit(Money::new(300, Currency::EUR)).unwrap();
        assert_eq!(account.balance.amount(), 700);
    }

    #[test]
    fn test_insufficient_funds() {
        let mut account = Account::new(UserId::new(), Currency::EUR);
        account.credit(Money::new(100, Currency::EUR)).unwrap();
        let result = account.debit(Money::new(200, Currency::EUR));
        assert_eq!(
            result,
            Err(LedgerError::AccountHasNotEnoughAmountForPayment)
        );
        assert_eq!(account.balance.amount(), 100);
    }

    #[test]
    fn test_cross_currency_debit_rejected() {
        let mut account = Account::new(UserId::new(), Currency::EUR);
        account.credit(Money::new(100, Currency::EUR)).unwrap();
        let result = account.debit(Money::new(50, Currency::USD));
        assert_eq!(result, Err(LedgerError::AccountNotFound));
    }
}
