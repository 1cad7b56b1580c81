//! Authentication service.
//!
//! Registration, password login and account updates. Session tokens are
//! issued separately by [`TokenService`](crate::services::TokenService).

mod error;
pub mod password;

pub use error::AuthError;
pub use password::{MIN_PASSWORD_LENGTH, hash_password, verify_password};

use marketboard_core::{Email, Role, UserId};

use crate::db::{Database, RepositoryError, UserRepository};
use crate::models::{User, UserUpdate};

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidRole` if `role` is not `vendor` or `customer`.
    /// Returns `AuthError::BlankName` if the name is blank.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: &str,
        name: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let role: Role = role.parse()?;
        let name = normalize_name(name)?;
        password::validate_password(password)?;

        // Cheap duplicate check first so a taken address doesn't cost a hash.
        // The repository re-checks under its write lock.
        if self.users.find_by_email(&email).await.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = password::hash_password_blocking(password.to_owned()).await?;

        let user = self
            .users
            .create(&email, password_hash, role, name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "Registered account");
        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = password::verify_password_blocking(
            password.to_owned(),
            user.password_hash.clone(),
        )
        .await?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get an account by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account doesn't exist.
    pub async fn get_user(&self, id: UserId) -> Result<User, AuthError> {
        self.users
            .find_by_id(id)
            .await
            .ok_or(AuthError::UserNotFound)
    }

    /// Change an account's display name and/or password.
    ///
    /// Tokens issued before the change remain valid until they expire.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BlankName` or `AuthError::WeakPassword` for invalid input.
    /// Returns `AuthError::UserNotFound` if the account doesn't exist.
    pub async fn update_account(
        &self,
        id: UserId,
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AuthError> {
        let name = name.map(normalize_name).transpose()?;

        let password_hash = match password {
            Some(password) => {
                password::validate_password(password)?;
                Some(password::hash_password_blocking(password.to_owned()).await?)
            }
            None => None,
        };

        self.users
            .update(
                id,
                UserUpdate {
                    name,
                    password_hash,
                },
            )
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

fn normalize_name(name: &str) -> Result<String, AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::BlankName);
    }
    Ok(name.to_owned())
}
