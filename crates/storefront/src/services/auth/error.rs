//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] marketboard_core::EmailError),

    /// Role is neither `vendor` nor `customer`.
    #[error("Invalid role")]
    InvalidRole(#[from] marketboard_core::RoleError),

    /// Display name is blank.
    #[error("name must not be blank")]
    BlankName,

    /// Invalid credentials (wrong password or user not found).
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// User already exists.
    #[error("User already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("{0}")]
    WeakPassword(String),

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
