//! Authorization guard.
//!
//! Decides, from supplied credentials and the requested operation, whether
//! the caller acts as the configured administrator or as the owner of the
//! targeted resources. The decision is made before any engine or
//! administration logic runs and carries no side effects.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use ledger_types::{AccountStore, LedgerError, User};

/// Identifier/secret pair extracted from the request's Basic credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Email used as the login identifier
    pub email: String,
    /// Plaintext secret, compared verbatim
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The administrator identity supplied via process configuration.
///
/// A process-wide constant injected at startup; never stored as a User.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub email: String,
    pub password: String,
}

impl AdminIdentity {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Operations subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListOwnAccounts,
    SendPayment,
    CreateUser,
    RemoveUser,
    SaveAccount,
    RemoveAccount,
}

impl Operation {
    /// Whether only the administrator may perform this operation.
    fn admin_only(&self) -> bool {
        matches!(
            self,
            Operation::CreateUser
                | Operation::RemoveUser
                | Operation::SaveAccount
                | Operation::RemoveAccount
        )
    }
}

/// Role granted to a caller by the guard.
#[derive(Debug, Clone)]
pub enum Role {
    Administrator,
    Owner(User),
}

impl Role {
    /// Unwraps the resolved owner.
    ///
    /// The administrator is not a stored user, so operations that act on
    /// the caller's own resources treat an administrator role as an
    /// unresolvable identity.
    pub fn into_owner(self) -> Result<User, LedgerError> {
        match self {
            Role::Owner(user) => Ok(user),
            Role::Administrator => Err(LedgerError::UserNotFound),
        }
    }
}

/// Constant-time secret equality.
fn secrets_match(supplied: &str, expected: &str) -> bool {
    supplied.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Pure decision function over store lookups: resolves credentials to a
/// [`Role`] or denies with a [`LedgerError`].
pub struct AuthorizationGuard<S> {
    store: Arc<S>,
    admin: AdminIdentity,
}

impl<S: AccountStore> AuthorizationGuard<S> {
    pub fn new(store: Arc<S>, admin: AdminIdentity) -> Self {
        Self { store, admin }
    }

    /// Exact identifier+secret match against the configured administrator.
    pub fn is_administrator(&self, credentials: &Credentials) -> bool {
        credentials.email == self.admin.email
            && secrets_match(&credentials.password, &self.admin.password)
    }

    /// Decides whether `credentials` may perform `operation`.
    ///
    /// Administrator-only operations are decided without touching the
    /// store: the credential check precedes any existence check, so a
    /// non-administrator is denied `BadCredentials` no matter what the
    /// operation targets. Owner operations resolve the email through the
    /// store: an unknown identifier is `UserNotFound`, a wrong secret is
    /// `BadCredentials`.
    pub async fn authorize(
        &self,
        credentials: &Credentials,
        operation: Operation,
    ) -> Result<Role, LedgerError> {
        if operation.admin_only() {
            if self.is_administrator(credentials) {
                return Ok(Role::Administrator);
            }
            return Err(LedgerError::BadCredentials);
        }

        let user = self
            .store
            .find_user_by_email(&credentials.email)
            .await
            .map_err(|_| LedgerError::UserNotFound)?
            .ok_or(LedgerError::UserNotFound)?;

        if !secrets_match(&credentials.password, &user.password) {
            return Err(LedgerError::BadCredentials);
        }

        Ok(Role::Owner(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_match_verbatim() {
        assert!(secrets_match("parola", "parola"));
        assert!(!secrets_match("parola", "Parola"));
        assert!(!secrets_match("parola", "parola "));
    }

    #[test]
    fn test_admin_only_operations() {
        assert!(Operation::CreateUser.admin_only());
        assert!(Operation::RemoveUser.admin_only());
        assert!(Operation::SaveAccount.admin_only());
        assert!(Operation::RemoveAccount.admin_only());
        assert!(!Operation::ListOwnAccounts.admin_only());
        assert!(!Operation::SendPayment.admin_only());
    }

    #[test]
    fn test_administrator_role_is_not_an_owner() {
        assert_eq!(
            Role::Administrator.into_owner().unwrap_err(),
            LedgerError::UserNotFound
        );
    }
}
