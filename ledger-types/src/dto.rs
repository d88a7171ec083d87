//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Account, AccountId, Currency, Payment, PaymentId, User, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// User DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new user (administrator only).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Unique, case-sensitive login email
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    pub password: String,
}

/// User representation returned to callers. Never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "john.doe@example.com")]
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Query parameters for removing a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoveUserParams {
    #[schema(example = "john.doe@example.com")]
    pub email: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Account DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create or overwrite an account (administrator only).
///
/// Acts as an upsert keyed by `id`; omitting the id creates a fresh account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AccountId>,
    /// Owning user
    pub user_id: UserId,
    pub currency: Currency,
    /// Balance in smallest currency unit
    #[schema(example = 10000)]
    pub amount: u64,
}

/// Account representation returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: AccountId,
    pub user_id: UserId,
    pub currency: Currency,
    /// Balance in smallest currency unit
    #[schema(example = 10000)]
    pub amount: u64,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            user_id: account.user_id,
            currency: account.currency(),
            amount: account.balance.amount(),
        }
    }
}

/// Query parameters for removing an account by owner and currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoveAccountParams {
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    pub currency: Currency,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters for sending a payment from the caller's account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendPaymentRequest {
    /// Receiver's email
    #[schema(example = "jane.roe@example.com")]
    pub receiver: String,
    pub currency: Currency,
    /// Amount in smallest currency unit
    #[schema(example = 1000)]
    pub amount: u64,
}

/// Payment record returned after a successful transfer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub sender_account_id: AccountId,
    pub receiver_account_id: AccountId,
    pub currency: Currency,
    /// Amount in smallest currency unit
    #[schema(example = 1000)]
    pub amount: u64,
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id,
            sender_account_id: payment.sender_account_id,
            receiver_account_id: payment.receiver_account_id,
            currency: payment.currency(),
            amount: payment.amount.amount(),
            created_at: payment.created_at,
        }
    }
}
