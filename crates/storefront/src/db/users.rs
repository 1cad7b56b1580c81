//! User repository.
//!
//! Accounts are keyed by [`UserId`] and indexed by the case-folded email
//! address, so `Shop@Example.com` and `shop@example.com` are the same
//! account.

use chrono::Utc;

use marketboard_core::{Email, Role, UserId};

use super::{Database, RepositoryError};
use crate::models::{User, UserUpdate};

/// Repository for user accounts.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get a user by email address, ignoring case.
    pub async fn find_by_email(&self, email: &Email) -> Option<User> {
        let table = self.db.users.read().await;
        table
            .by_email
            .get(&email.lookup_key())
            .and_then(|id| table.by_id.get(id))
            .cloned()
    }

    /// Get a user by ID.
    pub async fn find_by_id(&self, id: UserId) -> Option<User> {
        self.db.users.read().await.by_id.get(&id).cloned()
    }

    /// Create a new account.
    ///
    /// The email check and the insert happen under one write lock, so two
    /// concurrent registrations for the same address cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Persistence` if the snapshot write fails.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: String,
        role: Role,
        name: String,
    ) -> Result<User, RepositoryError> {
        let user = {
            let mut table = self.db.users.write().await;
            let key = email.lookup_key();
            if table.by_email.contains_key(&key) {
                return Err(RepositoryError::Conflict(
                    "email already registered".to_owned(),
                ));
            }

            let user = User {
                id: UserId::generate(),
                email: email.clone(),
                password_hash,
                role,
                name,
                created_at: Utc::now(),
            };
            table.by_email.insert(key, user.id);
            table.by_id.insert(user.id, user.clone());
            user
        };

        self.db.persist().await?;
        Ok(user)
    }

    /// Apply a partial update to an account.
    ///
    /// Returns `None` if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Persistence` if the snapshot write fails.
    pub async fn update(
        &self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<Option<User>, RepositoryError> {
        let updated = {
            let mut table = self.db.users.write().await;
            let Some(user) = table.by_id.get_mut(&id) else {
                return Ok(None);
            };
            update.apply(user);
            user.clone()
        };

        self.db.persist().await?;
        Ok(Some(updated))
    }

    /// Number of registered accounts.
    pub async fn count(&self) -> usize {
        self.db.users.read().await.by_id.len()
    }
}
