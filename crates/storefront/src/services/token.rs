//! Session tokens.
//!
//! Tokens are HS256 JWTs carrying the caller's [`Identity`] plus `iat` and
//! `exp`. Verification needs only the secret, never a store lookup. There
//! is no revocation: a token stays valid until it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Identity;

/// How long an issued token stays valid, in days.
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

fn token_lifetime() -> Duration {
    Duration::days(TOKEN_LIFETIME_DAYS)
}

/// Errors that can occur while issuing a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    identity: Identity,
    iat: i64,
    exp: i64,
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let key = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Sign a token for `identity`, valid for [`TOKEN_LIFETIME_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            identity: identity.clone(),
            iat: now.timestamp(),
            exp: (now + token_lifetime()).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify a token and return the identity it carries.
    ///
    /// Malformed, tampered, expired or foreign-algorithm tokens all yield
    /// `None`.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Identity> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims.identity),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketboard_core::{Email, Role, UserId};

    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&SecretString::from(secret.to_owned()))
    }

    fn identity() -> Identity {
        Identity {
            id: UserId::generate(),
            email: Email::parse("shop@example.com").unwrap(),
            role: Role::Vendor,
            name: "Shop".to_owned(),
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service("test-secret-key-12345");
        let identity = identity();

        let token = tokens.issue(&identity).unwrap();
        assert_eq!(tokens.verify(&token), Some(identity));
    }

    #[test]
    fn test_payload_fields_and_expiry() {
        let tokens = service("test-secret-key-12345");
        let token = tokens.issue(&identity()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"test-secret-key-12345"),
            &validation,
        )
        .unwrap()
        .claims;

        assert_eq!(claims["role"], "vendor");
        assert_eq!(claims["email"], "shop@example.com");
        assert_eq!(claims["name"], "Shop");
        let lifetime = claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap();
        assert_eq!(lifetime, token_lifetime().num_seconds());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let tokens = service("test-secret-key-12345");
        assert!(tokens.verify("").is_none());
        assert!(tokens.verify("invalid.token.here").is_none());
    }

    #[test]
    fn test_different_secret_rejects() {
        let token = service("secret-one").issue(&identity()).unwrap();
        assert!(service("secret-two").verify(&token).is_none());
    }

    #[test]
    fn test_tampered_payload_rejects() {
        let tokens = service("test-secret-key-12345");
        let token = tokens.issue(&identity()).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = service("attacker").issue(&identity()).unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap().to_owned();
        parts[1] = &forged_payload;

        assert!(tokens.verify(&parts.join(".")).is_none());
    }

    #[test]
    fn test_expired_token_rejects() {
        let tokens = service("test-secret-key-12345");
        let long_ago = Utc::now() - Duration::days(30);
        let claims = Claims {
            identity: identity(),
            iat: long_ago.timestamp(),
            exp: (long_ago + token_lifetime()).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        assert!(tokens.verify(&token).is_none());
    }

    #[test]
    fn test_other_algorithm_rejects() {
        let tokens = service("test-secret-key-12345");
        let token = encode(
            &Header::new(Algorithm::HS512),
            &Claims {
                identity: identity(),
                iat: Utc::now().timestamp(),
                exp: (Utc::now() + token_lifetime()).timestamp(),
            },
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        assert!(tokens.verify(&token).is_none());
    }
}
