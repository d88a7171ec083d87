//! # Ledger Repository
//!
//! Concrete store implementations (adapters) for the ledger service.
//! This crate provides database adapters that implement the `AccountStore`
//! port.

#[cfg(not(feature = "sqlite"))]
compile_error!("Enable a repo feature: `sqlite`.");

#[cfg(feature = "sqlite")]
use async_trait::async_trait;
#[cfg(feature = "sqlite")]
use ledger_types::{Account, AccountStore, Currency, Payment, StoreError, User, UserId};

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;


/// Unified store wrapper around the configured adapter.
#[cfg(feature = "sqlite")]
pub struct Repo {
    inner: sqlite::SqliteRepo,
}

/// Build and initialize a store from a database URL.
///
/// This function:
/// 1. Connects to the database
/// 2. Runs migrations to create tables
/// 3. Returns a ready-to-use `Repo`
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo("sqlite://ledger.db?mode=rwc").await?;
/// ```
#[cfg(feature = "sqlite")]
pub async fn build_repo(database_url: &str) -> anyhow::Result<Repo> {
    Repo::new(database_url).await
}

#[cfg(feature = "sqlite")]
impl Repo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let inner = sqlite::SqliteRepo::new(database_url).await?;
        Ok(Self { inner })
    }
}

// Re-export the concrete repo for direct use if needed
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepo;

// ─────────────────────────────────────────────────────────────────────────────
// Implement AccountStore for Repo (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
#[async_trait]
impl AccountStore for Repo {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.inner.find_user_by_email(email).await
    }

    async fn list_accounts_for_user(&self, user_id: UserId) -> Result<Vec<Account>, StoreError> {
        self.inner.list_accounts_for_user(user_id).await
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.inner.insert_user(user).await
    }

    async fn delete_user(&self, email: &str) -> Result<(), StoreError> {
        self.inner.delete_user(email).await
    }

    async fn upsert_account(&self, account: &Account) -> Result<(), StoreError> {
        self.inner.upsert_account(account).await
    }

    async fn delete_account(
        &self,
        owner_email: &str,
        currency: Currency,
    ) -> Result<(), StoreError> {
        self.inner.delete_account(owner_email, currency).await
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), StoreError> {
        self.inner.insert_payment(payment).await
    }
}
