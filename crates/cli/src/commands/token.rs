//! Session token commands.
//!
//! # Usage
//!
//! ```bash
//! # Issue a token for an existing account
//! mb-cli token issue --id 0b9c... --email shop@example.com --role vendor --name "Shop"
//!
//! # Inspect a token
//! mb-cli token verify eyJhbGciOi...
//! ```
//!
//! # Environment Variables
//!
//! - `MARKETBOARD_TOKEN_SECRET` (or `JWT_SECRET`) - Must match the server's
//!   secret for tokens to be accepted

use marketboard_core::{Email, Role, UserId};
use marketboard_storefront::{
    config::{ConfigError, StorefrontConfig},
    models::Identity,
    services::{TokenError, TokenService},
};
use thiserror::Error;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid user ID.
    #[error("Invalid user ID: {0}")]
    InvalidId(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] marketboard_core::EmailError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: vendor, customer")]
    InvalidRole(String),

    /// Signing failed.
    #[error("Failed to sign token: {0}")]
    Signing(#[from] TokenError),

    /// The token did not verify.
    #[error("Token is invalid or expired")]
    Rejected,

    /// Output could not be produced.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

fn token_service() -> Result<TokenService, TokenCommandError> {
    let config = StorefrontConfig::from_env()?;
    if config.token_secret_is_default {
        tracing::warn!("MARKETBOARD_TOKEN_SECRET is not set; using the development secret");
    }
    Ok(TokenService::new(&config.token_secret))
}

/// Build the identity a new token should carry.
///
/// A missing `id` gets a fresh one, useful for exercising a server that has
/// no matching account.
///
/// # Errors
///
/// Returns `TokenCommandError` if any field is invalid.
pub fn identity_from_args(
    id: Option<&str>,
    email: &str,
    role: &str,
    name: &str,
) -> Result<Identity, TokenCommandError> {
    let id = match id {
        Some(raw) => raw
            .parse::<UserId>()
            .map_err(|_| TokenCommandError::InvalidId(raw.to_owned()))?,
        None => UserId::generate(),
    };
    let role: Role = role
        .parse()
        .map_err(|_| TokenCommandError::InvalidRole(role.to_owned()))?;

    Ok(Identity {
        id,
        email: Email::parse(email)?,
        role,
        name: name.trim().to_owned(),
    })
}

/// Sign a token for the given identity.
///
/// # Errors
///
/// Returns `TokenCommandError` if the input or configuration is invalid.
pub fn issue(
    id: Option<&str>,
    email: &str,
    role: &str,
    name: &str,
) -> Result<String, TokenCommandError> {
    let identity = identity_from_args(id, email, role, name)?;
    let token = token_service()?.issue(&identity)?;
    tracing::info!(user_id = %identity.id, role = %identity.role, "Issued token");
    Ok(token)
}

/// Verify a token and render its identity as JSON.
///
/// # Errors
///
/// Returns `TokenCommandError::Rejected` if the token does not verify.
pub fn verify(token: &str) -> Result<String, TokenCommandError> {
    let identity = token_service()?
        .verify(token.trim())
        .ok_or(TokenCommandError::Rejected)?;
    Ok(serde_json::to_string_pretty(&identity)?)
}
