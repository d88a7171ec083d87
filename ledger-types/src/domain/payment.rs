//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::AccountId;
use super::money::{Currency, Money};

/// Unique identifier for a Payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PaymentId from an existing UUID.
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

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An immutable record of one completed transfer.
///
/// Created exactly once per successful transfer, then never mutated or
/// deleted by normal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Account that was debited
    pub sender_account_id: AccountId,
    /// Account that was credited
    pub receiver_account_id: AccountId,
    /// Amount transferred
    pub amount: Money,
    /// When the transfer completed
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment record for a completed transfer.
    pub fn new(sender_account_id: AccountId, receiver_account_id: AccountId, amount: Money) -> Self {
        Self {
            id: PaymentId::new(),
            sender_account_id,
            receiver_account_id,
            amount,
            created_at: Utc::now(),
        }
    }

    /// Reconstructs a payment from stored fields.
    pub fn from_parts(
        id: PaymentId,
        sender_account_id: AccountId,
        receiver_account_id: AccountId,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sender_account_id,
            receiver_account_id,
            amount,
            created_at,
        }
    }

    /// Returns the currency of the transferred amount.
    pub fn currency(&self) -> Currency {
        self.amount.currency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_creation() {
        let sender = AccountId::new();
        let receiver = AccountId::new();
        let payment = Payment::new(sender, receiver, Money::new(500, Currency::EUR));

        assert_eq!(payment.sender_account_id, sender);
        assert_eq!(payment.receiver_account_id, receiver);
        assert_eq!(payment.amount.amount(), 500);
        assert_eq!(payment.currency(), Currency::EUR);
    }
}
