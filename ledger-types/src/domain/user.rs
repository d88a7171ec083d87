//! User domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier for a User.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random UserId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a UserId from an existing UUID.
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

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A registered account holder.
///
/// The email is the unique login identifier; the id keys ownership
/// relations. Users are created by the administrator and immutable
/// afterwards except for removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique, case-sensitive login key
    pub email: String,
    /// Opaque secret, compared verbatim
    pub password: String,
}

impl User {
    /// Creates a new user with a fresh id.
    pub fn new(first_name: String, last_name: String, email: String, password: String) -> Self {
        Self {
            id: UserId::new(),
            first_name,
            last_name,
            email,
            password,
        }
    }

    /// Reconstructs a user from stored fields.
    pub fn from_parts(
        id: UserId,
        first_name: String,
        last_name: String,
        email: String,
        password: String,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            password,
        }
    }
}
