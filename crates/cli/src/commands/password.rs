//! Password hashing command.
//!
//! Produces the same Argon2id PHC strings the server stores, for seeding a
//! snapshot file by hand.

use marketboard_storefront::services::auth::{AuthError, password};

/// Hash a plaintext password.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short to be
/// accepted at registration, or `AuthError::PasswordHash` if hashing fails.
pub async fn hash(plaintext: &str) -> Result<String, AuthError> {
    password::validate_password(plaintext)?;
    password::hash_password_blocking(plaintext.to_owned()).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_verifies() {
        let phc = hash("password123").await.unwrap();
        assert!(password::verify_password("password123", &phc));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        assert!(matches!(hash("abc").await, Err(AuthError::WeakPassword(_))));
    }
}
