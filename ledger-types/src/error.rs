//! Error types for the ledger service.

/// Closed taxonomy of user-visible failures.
///
/// `Display` is the fixed human-readable message; [`LedgerError::kind`] is
/// the stable identifier clients branch on programmatically. Every request
/// surfaces exactly one of these kinds or one success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("user could not be found")]
    UserNotFound,

    #[error("credentials do not grant access to the resource")]
    BadCredentials,

    #[error("a user with the same email already exists")]
    UserWithSameEmailAlreadyExists,

    #[error("user could not be removed")]
    UserCouldNotBeRemoved,

    #[error("account does not have enough amount for the payment")]
    AccountHasNotEnoughAmountForPayment,

    #[error("account could not be saved")]
    AccountCouldNotBeSaved,

    #[error("account could not be removed")]
    AccountCouldNotBeRemoved,

    #[error("no account found for the requested currency")]
    AccountNotFound,
}

impl LedgerError {
    /// Stable textual identifier for this failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::UserNotFound => "UserNotFound",
            LedgerError::BadCredentials => "BadCredentials",
            LedgerError::UserWithSameEmailAlreadyExists => "UserWithSameEmailAlreadyExists",
            LedgerError::UserCouldNotBeRemoved => "UserCouldNotBeRemoved",
            LedgerError::AccountHasNotEnoughAmountForPayment => {
                "AccountHasNotEnoughAmountForPayment"
            }
            LedgerError::AccountCouldNotBeSaved => "AccountCouldNotBeSaved",
            LedgerError::AccountCouldNotBeRemoved => "AccountCouldNotBeRemoved",
            LedgerError::AccountNotFound => "AccountNotFound",
        }
    }
}

/// Store-level errors (data access failures).
///
/// These never reach a caller raw; the service maps each to the
/// [`LedgerError`] kind of the operation in flight.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
