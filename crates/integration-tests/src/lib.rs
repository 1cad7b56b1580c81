//! Integration test harness for the Marketboard storefront API.
//!
//! Tests drive the full router (middleware included) in-process with
//! `tower::ServiceExt::oneshot`, so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketboard-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let app = TestApp::new();
//! let vendor = app.register("shop@example.com", "vendor", "Shop").await;
//! let resp = app.get("/products", Some(&vendor.token)).await;
//! assert_eq!(resp.status, StatusCode::OK);
//! ```

#![allow(clippy::missing_panics_doc)]

use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use marketboard_storefront::{
    app,
    config::StorefrontConfig,
    db::{Database, SnapshotFile, seed},
    services::auth::password::hash_password,
    state::AppState,
};

/// Signing secret used by every test app.
pub const TEST_TOKEN_SECRET: &str = "q8Vt!rN2#zLm5@wXc7$kJp0&hYd4^sGf";

/// Password used for accounts created through [`TestApp::register`].
pub const TEST_PASSWORD: &str = "hunter22";

/// A response with its body decoded.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw body text.
    pub text: String,
    /// Body parsed as JSON, or `Value::Null` when it is not JSON.
    pub body: Value,
}

impl TestResponse {
    /// The `error` message of an error body.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// An account registered through the API.
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub id: String,
    pub token: String,
    pub user: Value,
}

/// The storefront router wired to a private store.
pub struct TestApp {
    state: AppState,
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// App backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_database(Database::in_memory())
    }

    /// App backed by a snapshot file, loading whatever it already holds.
    pub async fn with_snapshot(path: &Path) -> Self {
        let db = Database::open(SnapshotFile::new(path))
            .await
            .expect("failed to open snapshot");
        Self::with_database(db)
    }

    /// App whose store holds the demo vendors and products.
    pub async fn seeded() -> Self {
        let db = Database::in_memory();
        let hash = hash_password(seed::DEMO_PASSWORD).expect("failed to hash demo password");
        seed::seed_demo_data(&db, &hash)
            .await
            .expect("failed to seed demo data");
        Self::with_database(db)
    }

    fn with_database(db: Database) -> Self {
        let config = StorefrontConfig::from_source(|key| match key {
            "MARKETBOARD_TOKEN_SECRET" => Some(TEST_TOKEN_SECRET.to_owned()),
            "MARKETBOARD_SEED_DEMO" => Some("false".to_owned()),
            _ => None,
        })
        .expect("test config must be valid");

        let state = AppState::new(config, db);
        let router = app(state.clone());
        Self { state, router }
    }

    /// Shared application state, for inspecting the store directly.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Send a prepared request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }

    /// Send a request with an optional bearer token and JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Register an account with [`TEST_PASSWORD`], asserting success.
    pub async fn register(&self, email: &str, role: &str, name: &str) -> TestAccount {
        let resp = self
            .post(
                "/auth/register",
                None,
                &json!({
                    "email": email,
                    "password": TEST_PASSWORD,
                    "role": role,
                    "name": name,
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK, "register failed: {}", resp.text);
        account_from(&resp)
    }

    /// Log in, asserting success.
    pub async fn login(&self, email: &str, password: &str) -> TestAccount {
        let resp = self
            .post(
                "/auth/login",
                None,
                &json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK, "login failed: {}", resp.text);
        account_from(&resp)
    }

    /// Create a product as `vendor`, asserting success, and return it.
    pub async fn create_product(&self, vendor: &TestAccount, body: &Value) -> Value {
        let resp = self.post("/products", Some(&vendor.token), body).await;
        assert_eq!(
            resp.status,
            StatusCode::CREATED,
            "create failed: {}",
            resp.text
        );
        resp.body["product"].clone()
    }
}

fn account_from(resp: &TestResponse) -> TestAccount {
    let user = resp.body["user"].clone();
    TestAccount {
        id: user["id"].as_str().expect("user id").to_owned(),
        token: resp.body["token"].as_str().expect("token").to_owned(),
        user,
    }
}

/// A valid product body with the given name and categories.
#[must_use]
pub fn product_body(name: &str, categories: &[&str]) -> Value {
    json!({
        "name": name,
        "image": format!("https://img.example.org/{}.jpg", name.to_lowercase().replace(' ', "-")),
        "whatsappLink": "+234 912 320 5081",
        "instagramLink": "@marketboard_demo",
        "categories": categories,
    })
}
