//! Ledger Application Service
//!
//! Orchestrates the authorization guard, the ledger engine and the
//! administration operations over the `AccountStore` port. Contains NO
//! infrastructure logic - pure business orchestration.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use ledger_types::{
    Account, AccountId, AccountStore, CreateUserRequest, Currency, LedgerError, Money, Payment,
    SaveAccountRequest, User, UserId,
};

use crate::auth::{AdminIdentity, AuthorizationGuard, Credentials, Operation};

/// Registry of per-account locks serializing balance mutation.
///
/// Transfers acquire both locks in ascending account-id order, so two
/// transfers over the same pair in opposite directions cannot deadlock.
struct AccountLocks {
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl AccountLocks {
    fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    fn get(&self, id: AccountId) -> Arc<Mutex<()>> {
        self.locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Lock handles for a pair of distinct accounts, ascending id first.
    fn ordered_pair(&self, a: AccountId, b: AccountId) -> (Arc<Mutex<()>>, Arc<Mutex<()>>) {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        (self.get(first), self.get(second))
    }
}

/// Application service for ledger operations.
///
/// Generic over `S: AccountStore` - the adapter is injected at compile time.
/// This enables:
/// - Swapping stores without code changes
/// - Testing with an in-memory store
/// - Compile-time checks for port implementation
pub struct LedgerService<S: AccountStore> {
    store: Arc<S>,
    guard: AuthorizationGuard<S>,
    locks: AccountLocks,
}

impl<S: AccountStore> LedgerService<S> {
    /// Creates a new ledger service over the given store, with the
    /// administrator identity injected into the authorization guard.
    pub fn new(store: S, admin: AdminIdentity) -> Self {
        let store = Arc::new(store);
        Self {
            guard: AuthorizationGuard::new(store.clone(), admin),
            store,
            locks: AccountLocks::new(),
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Account Listing
    // ─────────────────────────────────────────────────────────────────────────

    /// Lists the caller's own accounts. An empty result is a valid outcome,
    /// distinct from any error.
    #[tracing::instrument(skip(self, credentials))]
    pub async fn get_accounts(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<Account>, LedgerError> {
        let caller = self
            .guard
            .authorize(credentials, Operation::ListOwnAccounts)
            .await?
            .into_owner()?;

        self.store
            .list_accounts_for_user(caller.id)
            .await
            .map_err(|_| LedgerError::AccountNotFound)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ledger Engine
    // ─────────────────────────────────────────────────────────────────────────

    /// Transfers `amount` from the caller's account in `currency` to the
    /// receiver's account in the same currency.
    ///
    /// Validations run in order and the first failure short-circuits before
    /// any mutation. The mutation itself holds exclusive locks on both
    /// accounts, re-reads balances under the locks, and compensates
    /// already-applied writes if a later persistence step fails, so no
    /// intermediate state is ever observable.
    #[tracing::instrument(skip(self, credentials), fields(receiver = %receiver_email))]
    pub async fn send_payment(
        &self,
        credentials: &Credentials,
        receiver_email: &str,
        currency: Currency,
        amount: u64,
    ) -> Result<Payment, LedgerError> {
        // 1. The sender must be the authenticated user.
        let sender = self
            .guard
            .authorize(credentials, Operation::SendPayment)
            .await?
            .into_owner()?;

        // 2. Resolve the receiver by email.
        let receiver = self
            .store
            .find_user_by_email(receiver_email)
            .await
            .map_err(|_| LedgerError::UserNotFound)?
            .ok_or(LedgerError::UserNotFound)?;

        // 3-4. Both sides need an account in the requested currency.
        let sender_account = self.account_in_currency(sender.id, currency).await?;
        let receiver_account = self.account_in_currency(receiver.id, currency).await?;

        // A transfer needs two distinct accounts; this also keeps the
        // ordered lock acquisition below free of a double-lock on one id.
        if sender_account.id == receiver_account.id {
            return Err(LedgerError::AccountNotFound);
        }

        // 5. The amount must be strictly positive and covered by the sender.
        let money = Money::new(amount, currency);
        if amount == 0 || !sender_account.has_sufficient_funds(&money) {
            return Err(LedgerError::AccountHasNotEnoughAmountForPayment);
        }

        // 6. Exclusive access to both accounts for the whole mutation.
        let (first, second) = self
            .locks
            .ordered_pair(sender_account.id, receiver_account.id);
        let _first_guard = first.lock_owned().await;
        let _second_guard = second.lock_owned().await;

        // Balances may have moved between validation and lock acquisition;
        // re-read and re-check under the locks.
        let mut sender_account = self.account_in_currency(sender.id, currency).await?;
        let mut receiver_account = self.account_in_currency(receiver.id, currency).await?;
        let sender_snapshot = sender_account.clone();
        let receiver_snapshot = receiver_account.clone();

        sender_account.debit(money)?;
        receiver_account.credit(money)?;

        self.store
            .upsert_account(&sender_account)
            .await
            .map_err(|_| LedgerError::AccountCouldNotBeSaved)?;

        if let Err(err) = self.store.upsert_account(&receiver_account).await {
            tracing::error!(%err, sender = %sender_account.id, "credit failed after debit, restoring sender");
            self.compensate(&[&sender_snapshot]).await;
            return Err(LedgerError::AccountCouldNotBeSaved);
        }

        let payment = Payment::new(sender_account.id, receiver_account.id, money);
        if let Err(err) = self.store.insert_payment(&payment).await {
            tracing::error!(%err, payment = %payment.id, "payment insert failed, restoring balances");
            self.compensate(&[&sender_snapshot, &receiver_snapshot]).await;
            return Err(LedgerError::AccountCouldNotBeSaved);
        }

        Ok(payment)
    }

    /// Locates the user's account in the given currency.
    async fn account_in_currency(
        &self,
        user_id: UserId,
        currency: Currency,
    ) -> Result<Account, LedgerError> {
        let accounts = self
            .store
            .list_accounts_for_user(user_id)
            .await
            .map_err(|_| LedgerError::AccountNotFound)?;

        accounts
            .into_iter()
            .find(|account| account.currency() == currency)
            .ok_or(LedgerError::AccountNotFound)
    }

    /// Re-writes pre-transfer snapshots after a partial persistence failure.
    /// Runs with both account locks still held.
    async fn compensate(&self, snapshots: &[&Account]) {
        for snapshot in snapshots {
            if let Err(err) = self.store.upsert_account(snapshot).await {
                tracing::error!(account = %snapshot.id, %err, "compensation write failed");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a new user. Administrator only; self-registration is not
    /// permitted even when the submitted profile matches the caller.
    #[tracing::instrument(skip(self, credentials, req), fields(email = %req.email))]
    pub async fn create_user(
        &self,
        credentials: &Credentials,
        req: CreateUserRequest,
    ) -> Result<User, LedgerError> {
        self.guard
            .authorize(credentials, Operation::CreateUser)
            .await?;

        let existing = self
            .store
            .find_user_by_email(&req.email)
            .await
            .map_err(|_| LedgerError::UserWithSameEmailAlreadyExists)?;
        if existing.is_some() {
            return Err(LedgerError::UserWithSameEmailAlreadyExists);
        }

        let user = User::new(req.first_name, req.last_name, req.email, req.password);

        // A concurrent insert can still race the pre-check; the store's
        // unique email constraint reports it as the same duplicate failure.
        self.store
            .insert_user(&user)
            .await
            .map_err(|_| LedgerError::UserWithSameEmailAlreadyExists)?;

        Ok(user)
    }

    /// Removes the user with the given email. Administrator only.
    #[tracing::instrument(skip(self, credentials))]
    pub async fn remove_user(
        &self,
        credentials: &Credentials,
        email: &str,
    ) -> Result<(), LedgerError> {
        self.guard
            .authorize(credentials, Operation::RemoveUser)
            .await?;

        self.store
            .delete_user(email)
            .await
            .map_err(|_| LedgerError::UserCouldNotBeRemoved)
    }

    /// Creates or overwrites an account. Administrator only.
    #[tracing::instrument(skip(self, credentials, req), fields(user_id = %req.user_id))]
    pub async fn save_account(
        &self,
        credentials: &Credentials,
        req: SaveAccountRequest,
    ) -> Result<Account, LedgerError> {
        self.guard
            .authorize(credentials, Operation::SaveAccount)
            .await?;

        let account = Account::from_parts(
            req.id.unwrap_or_default(),
            req.user_id,
            Money::new(req.amount, req.currency),
        );

        self.store
            .upsert_account(&account)
            .await
            .map_err(|_| LedgerError::AccountCouldNotBeSaved)?;

        Ok(account)
    }

    /// Removes the account held by `owner_email` in `currency`.
    /// Administrator only.
    #[tracing::instrument(skip(self, credentials))]
    pub async fn remove_account(
        &self,
        credentials: &Credentials,
        owner_email: &str,
        currency: Currency,
    ) -> Result<(), LedgerError> {
        self.guard
            .authorize(credentials, Operation::RemoveAccount)
            .await?;

        self.store
            .delete_account(owner_email, currency)
            .await
            .map_err(|_| LedgerError::AccountCouldNotBeRemoved)
    }
}
