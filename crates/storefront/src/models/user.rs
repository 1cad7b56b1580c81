//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use marketboard_core::{Email, Role, UserId};

/// A registered account.
///
/// Serialized only into the store snapshot; API responses expose
/// [`Identity`](super::Identity) instead so the password hash never leaves
/// the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address, unique ignoring case.
    pub email: Email,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Vendor or customer.
    pub role: Role,
    /// Display name (a shop name for vendors).
    pub name: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

/// Fields of a [`User`] that may change after registration.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

impl UserUpdate {
    /// Apply the provided fields to `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
    }
}
