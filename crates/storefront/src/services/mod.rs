//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Registration, password login, account updates
//! - `token` - Signed session tokens

pub mod auth;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use token::{TokenError, TokenService};
