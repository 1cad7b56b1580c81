//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Health check
//!
//! # Auth
//! POST   /auth/register           - Create an account, returns {user, token}
//! POST   /auth/login              - Password login, returns {user, token}
//! GET    /auth/me                 - Current account
//! PUT    /auth/me                 - Change name and/or password
//!
//! # Categories
//! GET    /categories/list         - Fixed catalog (public)
//! GET    /categories              - Categories in use
//!
//! # Products (token required)
//! GET    /products                - List (?category=)
//! POST   /products                - Create (vendor)
//! POST   /products/bulk           - Create many (vendor)
//! GET    /products/{id}           - Detail
//! PUT    /products/{id}           - Update (owning vendor)
//! DELETE /products/{id}           - Delete (owning vendor)
//! GET    /products/{id}/contact   - Contact deep link (?platform=)
//! ```

pub mod auth;
pub mod categories;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me).put(auth::update_me))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::in_use))
        .route("/list", get(categories::catalog))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/bulk", post(products::bulk_create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/{id}/contact", get(products::contact))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
