//! Category route handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use marketboard_core::{CATALOG, CatalogCategory};

use crate::middleware::{OptionalAuth, RequireAuth};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub categories: &'static [CatalogCategory],
}

#[derive(Debug, Serialize)]
pub struct InUseResponse {
    pub categories: Vec<String>,
}

/// `GET /categories/list` - the fixed catalog offered to vendors.
///
/// Public; a token, when sent, only identifies the caller in logs.
pub async fn catalog(OptionalAuth(caller): OptionalAuth) -> Json<CatalogResponse> {
    tracing::debug!(signed_in = caller.is_some(), "Serving category catalog");
    Json(CatalogResponse {
        categories: CATALOG,
    })
}

/// `GET /categories` - every category some product currently carries.
pub async fn in_use(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
) -> Json<InUseResponse> {
    Json(InUseResponse {
        categories: state.db().products().list_categories_in_use().await,
    })
}
