//! SQLite store adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use ledger_types::{Account, AccountStore, Currency, Payment, StoreError, User, UserId};

use crate::types::{DbAccount, DbUser};

fn db_err(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(db.message().to_string())
        }
        _ => StoreError::Database(e.to_string()),
    }
}

fn amount_to_db(amount: u64) -> Result<i64, StoreError> {
    i64::try_from(amount).map_err(|_| StoreError::Database("amount exceeds storage range".into()))
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database lives and dies with its connection; pin the
        // pool to a single long-lived connection for those URLs.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::raw_sql(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl AccountStore for SqliteRepo {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row: Option<DbUser> = sqlx::query_as(
            r#"SELECT id, first_name, last_name, email, password FROM users WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbUser::into_domain).transpose()
    }

    async fn list_accounts_for_user(&self, user_id: UserId) -> Result<Vec<Account>, StoreError> {
        let rows: Vec<DbAccount> = sqlx::query_as(
            r#"SELECT id, user_id, currency, amount FROM accounts WHERE user_id = ?"#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbAccount::into_domain).collect()
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO users (id, first_name, last_name, email, password) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(user.id.to_string())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn delete_user(&self, email: &str) -> Result<(), StoreError> {
        // The user's accounts go with the user, in one database transaction.
        let mut db_tx = self.pool.begin().await.map_err(db_err)?;

        let user_id: Option<String> = sqlx::query_scalar(r#"SELECT id FROM users WHERE email = ?"#)
            .bind(email)
            .fetch_optional(&mut *db_tx)
            .await
            .map_err(db_err)?;

        let user_id = user_id.ok_or(StoreError::NotFound)?;

        sqlx::query(r#"DELETE FROM accounts WHERE user_id = ?"#)
            .bind(&user_id)
            .execute(&mut *db_tx)
            .await
            .map_err(db_err)?;

        let result = sqlx::query(r#"DELETE FROM users WHERE id = ?"#)
            .bind(&user_id)
            .execute(&mut *db_tx)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        db_tx.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn upsert_account(&self, account: &Account) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO accounts (id, user_id, currency, amount) VALUES (?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   user_id = excluded.user_id,
                   currency = excluded.currency,
                   amount = excluded.amount"#,
        )
        .bind(account.id.to_string())
        .bind(account.user_id.to_string())
        .bind(account.currency().to_string())
        .bind(amount_to_db(account.balance.amount())?)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn delete_account(
        &self,
        owner_email: &str,
        currency: Currency,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"DELETE FROM accounts
               WHERE user_id = (SELECT id FROM users WHERE email = ?) AND currency = ?"#,
        )
        .bind(owner_email)
        .bind(currency.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO payments (id, sender_account_id, receiver_account_id, currency, amount, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payment.id.to_string())
        .bind(payment.sender_account_id.to_string())
        .bind(payment.receiver_account_id.to_string())
        .bind(payment.currency().to_string())
        .bind(amount_to_db(payment.amount.amount())?)
        .bind(payment.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }
}
