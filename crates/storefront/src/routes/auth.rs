//! Authentication route handlers.
//!
//! Registration and login return the account's identity together with a
//! fresh session token. Clients send the token back as a bearer token (or
//! in the `token` cookie).

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::{ApiJson, AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Identity, User};
use crate::services::AuthService;
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Registration request body.
///
/// Fields are optional so a missing field produces a specific message
/// instead of a generic deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub name: Option<String>,
}

/// Login request body.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Account update request body.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

// =============================================================================
// Response Types
// =============================================================================

/// Identity plus a newly issued session token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: Identity,
    pub token: String,
}

/// Identity of the current account.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Identity,
}

fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn issue(state: &AppState, user: &User) -> Result<AuthResponse> {
    let identity = Identity::from(user);
    let token = state.tokens().issue(&identity)?;
    Ok(AuthResponse {
        user: identity,
        token,
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /auth/register`
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let (Some(email), Some(password), Some(role), Some(name)) = (
        present(body.email.as_ref()),
        present(body.password.as_ref()),
        present(body.role.as_ref()),
        present(body.name.as_ref()),
    ) else {
        return Err(AppError::BadRequest("All fields are required".to_owned()));
    };

    let user = AuthService::new(state.db())
        .register(email, password, role, name)
        .await?;

    Ok(Json(issue(&state, &user)?))
}

/// `POST /auth/login`
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let (Some(email), Some(password)) = (
        present(body.email.as_ref()),
        present(body.password.as_ref()),
    ) else {
        return Err(AppError::BadRequest(
            "Email and password are required".to_owned(),
        ));
    };

    let user = AuthService::new(state.db()).login(email, password).await?;
    tracing::info!(user_id = %user.id, "Login succeeded");

    Ok(Json(issue(&state, &user)?))
}

/// `GET /auth/me`
///
/// Reads the account from the store, so a renamed account shows its new
/// name even with an older token.
#[tracing::instrument(skip_all)]
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<MeResponse>> {
    let user = AuthService::new(state.db()).get_user(caller.id).await?;
    Ok(Json(MeResponse {
        user: Identity::from(&user),
    }))
}

/// `PUT /auth/me`
///
/// Returns a new token carrying the updated identity. Older tokens keep
/// working until they expire.
#[tracing::instrument(skip_all)]
pub async fn update_me(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    ApiJson(body): ApiJson<UpdateAccountRequest>,
) -> Result<Json<AuthResponse>> {
    if body.name.is_none() && body.password.is_none() {
        return Err(AppError::BadRequest("Nothing to update".to_owned()));
    }

    let user = AuthService::new(state.db())
        .update_account(caller.id, body.name.as_deref(), body.password.as_deref())
        .await?;

    Ok(Json(issue(&state, &user)?))
}
