//! Account store port trait.
//!
//! This is the primary port in the hexagonal architecture. Adapters
//! (SQLite, in-memory test doubles) implement this trait.

use crate::domain::{Account, Currency, Payment, User, UserId};
use crate::error::StoreError;

/// Durable keyed storage for User, Account and Payment records.
///
/// Every mutating call reports only success or failure; `Err` carries no
/// partial-result detail the service may rely on. Multi-record atomicity is
/// NOT assumed — the ledger engine serializes balance mutation itself and
/// compensates on partial failure.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    /// Finds a user by exact (case-sensitive) email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Lists all accounts owned by the given user.
    async fn list_accounts_for_user(&self, user_id: UserId) -> Result<Vec<Account>, StoreError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Inserts a new user. Fails on duplicate email.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// Deletes the user with the given email together with the user's
    /// accounts. Fails if no such user exists.
    async fn delete_user(&self, email: &str) -> Result<(), StoreError>;

    /// Creates or overwrites an account, keyed by account id.
    async fn upsert_account(&self, account: &Account) -> Result<(), StoreError>;

    /// Deletes the account held by `owner_email` in `currency`.
    /// Fails if no such account exists.
    async fn delete_account(&self, owner_email: &str, currency: Currency)
    -> Result<(), StoreError>;

    /// Appends an immutable payment record.
    async fn insert_payment(&self, payment: &Payment) -> Result<(), StoreError>;
}
