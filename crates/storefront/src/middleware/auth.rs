//! Caller identification and access checks.
//!
//! The session token is read from `Authorization: Bearer <token>` or, when
//! that header is absent, from the `token` cookie. Extractors resolve the
//! caller; the `require_*`/`ensure_*` helpers are called explicitly by each
//! handler that needs them.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::error::{AppError, set_sentry_user};
use crate::models::{Identity, Product};
use crate::services::TokenService;
use crate::state::AppState;

/// Cookie consulted when no bearer token is sent.
pub const TOKEN_COOKIE: &str = "token";

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the raw session token out of the request headers.
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
    {
        return Some(token.trim().to_owned());
    }

    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
}

/// Identify the caller from a bearer token or the `token` cookie.
///
/// Returns `None` when no token is present or it fails verification.
#[must_use]
pub fn resolve_caller(headers: &HeaderMap, tokens: &TokenService) -> Option<Identity> {
    let token = token_from_headers(headers)?;
    if token.is_empty() {
        return None;
    }
    tokens.verify(&token)
}

/// Extractor that requires a valid session token.
///
/// Rejects with `401 {"error": "Unauthorized"}` otherwise.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(caller): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", caller.name)
/// }
/// ```
pub struct RequireAuth(pub Identity);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = resolve_caller(&parts.headers, state.tokens())
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_owned()))?;

        tracing::Span::current().record("user_id", tracing::field::display(caller.id));
        set_sentry_user(&caller.id, Some(caller.email.as_str()));

        Ok(Self(caller))
    }
}

/// Extractor that optionally identifies the caller.
///
/// Unlike `RequireAuth`, this never rejects the request.
pub struct OptionalAuth(pub Option<Identity>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = resolve_caller(&parts.headers, state.tokens());
        if let Some(caller) = &caller {
            tracing::Span::current().record("user_id", tracing::field::display(caller.id));
        }
        Ok(Self(caller))
    }
}

/// Extractor that requires a vendor's session token.
///
/// Rejects with 401 without a valid token and 403 for customers. Placed
/// before path and body extractors, the role check wins over a missing
/// product or a malformed body.
pub struct RequireVendor(pub Identity);

impl FromRequestParts<AppState> for RequireVendor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(caller) = RequireAuth::from_request_parts(parts, state).await?;
        require_vendor(&caller)?;
        Ok(Self(caller))
    }
}

/// Allow only vendors.
///
/// # Errors
///
/// Returns `AppError::Forbidden` for customers.
pub fn require_vendor(caller: &Identity) -> Result<(), AppError> {
    if caller.is_vendor() {
        Ok(())
    } else {
        Err(forbidden())
    }
}

/// Allow reading `product`: customers may read anything, vendors only
/// their own listings.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when a vendor reads another vendor's product.
pub fn ensure_can_view(caller: &Identity, product: &Product) -> Result<(), AppError> {
    if caller.is_vendor() && product.vendor_id != caller.id {
        return Err(forbidden());
    }
    Ok(())
}

/// Allow changing `product` only for the vendor who owns it.
///
/// # Errors
///
/// Returns `AppError::Forbidden` for customers and for other vendors.
pub fn ensure_owner(caller: &Identity, product: &Product) -> Result<(), AppError> {
    require_vendor(caller)?;
    if product.vendor_id != caller.id {
        return Err(forbidden());
    }
    Ok(())
}

fn forbidden() -> AppError {
    AppError::Forbidden("Forbidden".to_owned())
}
