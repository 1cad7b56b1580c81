//! Session identity.

use serde::{Deserialize, Serialize};

use marketboard_core::{Email, Role, UserId};

use super::User;

/// Who is calling, as recorded in a session token.
///
/// Captured when the token is issued; later changes to the account are not
/// reflected until a new token is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: Email,
    pub role: Role,
    pub name: String,
}

impl Identity {
    #[must_use]
    pub const fn is_vendor(&self) -> bool {
        self.role.is_vendor()
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            name: user.name.clone(),
        }
    }
}
