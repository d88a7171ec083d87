//! Database row structs for the SQLite adapter.

use sqlx::FromRow;

use ledger_types::{Account, AccountId, Currency, Money, StoreError, User, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// User row from database.
#[derive(FromRow)]
pub struct DbUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Account row from database.
#[derive(FromRow)]
pub struct DbAccount {
    pub id: String,
    pub user_id: String,
    pub currency: String,
    pub amount: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse_currency(s: &str) -> Result<Currency, StoreError> {
    s.parse()
        .map_err(|_| StoreError::Database(format!("Unknown currency: {}", s)))
}

fn parse_uuid(s: &str) -> Result<uuid::Uuid, StoreError> {
    uuid::Uuid::parse_str(s).map_err(|e| StoreError::Database(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

impl DbUser {
    /// Convert database row to domain User.
    pub fn into_domain(self) -> Result<User, StoreError> {
        let id = UserId::from_uuid(parse_uuid(&self.id)?);
        Ok(User::from_parts(
            id,
            self.first_name,
            self.last_name,
            self.email,
            self.password,
        ))
    }
}

impl DbAccount {
    /// Convert database row to domain Account.
    pub fn into_domain(self) -> Result<Account, StoreError> {
        let currency = parse_currency(&self.currency)?;
        let amount = u64::try_from(self.amount)
            .map_err(|_| StoreError::Database(format!("Negative stored amount: {}", self.amount)))?;
        let id = AccountId::from_uuid(parse_uuid(&self.id)?);
        let user_id = UserId::from_uuid(parse_uuid(&self.user_id)?);
        Ok(Account::from_parts(id, user_id, Money::new(amount, currency)))
    }
}
