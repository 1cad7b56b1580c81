//! Integration tests for registration, login and the current account.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::json;

use marketboard_integration_tests::{TEST_PASSWORD, TestApp};

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn test_register_returns_identity_and_token() {
    let app = TestApp::new();
    let resp = app
        .post(
            "/auth/register",
            None,
            &json!({
                "email": "shop@example.com",
                "password": "secret1",
                "role": "vendor",
                "name": "Shop",
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let user = &resp.body["user"];
    assert_eq!(user["email"], "shop@example.com");
    assert_eq!(user["role"], "vendor");
    assert_eq!(user["name"], "Shop");
    assert!(user["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(!resp.text.contains("argon2"));
    assert!(resp.body["token"].as_str().is_some_and(|t| t.split('.').count() == 3));
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = TestApp::new();
    for body in [
        json!({ "password": "secret1", "role": "vendor", "name": "Shop" }),
        json!({ "email": "a@example.com", "role": "vendor", "name": "Shop" }),
        json!({ "email": "a@example.com", "password": "secret1", "name": "Shop" }),
        json!({ "email": "a@example.com", "password": "secret1", "role": "vendor" }),
        json!({ "email": "a@example.com", "password": "secret1", "role": "vendor", "name": "" }),
    ] {
        let resp = app.post("/auth/register", None, &body).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(resp.error(), Some("All fields are required"));
    }
}

#[tokio::test]
async fn test_register_invalid_role() {
    let app = TestApp::new();
    for role in ["admin", "Vendor"] {
        let resp = app
            .post(
                "/auth/register",
                None,
                &json!({
                    "email": "a@example.com",
                    "password": "secret1",
                    "role": role,
                    "name": "A",
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.error(), Some("Invalid role"));
    }
}

#[tokio::test]
async fn test_register_rejects_bad_email_and_short_password() {
    let app = TestApp::new();

    let resp = app
        .post(
            "/auth/register",
            None,
            &json!({ "email": "no-at-sign", "password": "secret1", "role": "customer", "name": "A" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error(), Some("Invalid email address"));

    let resp = app
        .post(
            "/auth/register",
            None,
            &json!({ "email": "a@example.com", "password": "123", "role": "customer", "name": "A" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.state().db().users().count().await, 0);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("dup@example.com", "vendor", "First").await;

    let resp = app
        .post(
            "/auth/register",
            None,
            &json!({
                "email": "DUP@example.com",
                "password": "another1",
                "role": "customer",
                "name": "Second",
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(resp.error(), Some("User already exists"));
    assert_eq!(app.state().db().users().count().await, 1);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let resp = app.send(request).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.error().is_some());
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_round_trip() {
    let app = TestApp::new();
    let registered = app.register("buyer@example.com", "customer", "Buyer").await;

    let logged_in = app.login("Buyer@Example.com", TEST_PASSWORD).await;
    assert_eq!(logged_in.id, registered.id);
    assert_eq!(logged_in.user["role"], "customer");

    let resp = app.get("/auth/me", Some(&logged_in.token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["user"]["id"], registered.id.as_str());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("known@example.com", "customer", "Known").await;

    let wrong_password = app
        .post(
            "/auth/login",
            None,
            &json!({ "email": "known@example.com", "password": "not-the-password" }),
        )
        .await;
    let unknown_email = app
        .post(
            "/auth/login",
            None,
            &json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.error(), Some("Invalid credentials"));
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new();
    let resp = app
        .post("/auth/login", None, &json!({ "email": "a@example.com" }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error(), Some("Email and password are required"));
}

#[tokio::test]
async fn test_seeded_vendor_can_log_in() {
    let app = TestApp::seeded().await;
    let vendor = app.login("fashion@example.com", "password123").await;
    assert_eq!(vendor.user["role"], "vendor");

    let resp = app.get("/products", Some(&vendor.token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let products = resp.body["products"].as_array().unwrap();
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p["vendorId"] == vendor.id.as_str()));
}

// ============================================================================
// Current Account
// ============================================================================

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let resp = app.get("/auth/me", None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body, json!({ "error": "Unauthorized" }));

    let resp = app.get("/auth/me", Some("not.a.token")).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_accepts_token_cookie() {
    let app = TestApp::new();
    let account = app.register("cookie@example.com", "customer", "Cookie").await;

    let request = Request::builder()
        .uri("/auth/me")
        .header(header::COOKIE, format!("theme=dark; token={}", account.token))
        .body(Body::empty())
        .unwrap();
    let resp = app.send(request).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["user"]["email"], "cookie@example.com");
}

#[tokio::test]
async fn test_bearer_header_wins_over_cookie() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "customer", "Alice").await;
    let bob = app.register("bob@example.com", "customer", "Bob").await;

    let request = Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {}", alice.token))
        .header(header::COOKIE, format!("token={}", bob.token))
        .body(Body::empty())
        .unwrap();
    let resp = app.send(request).await;

    assert_eq!(resp.body["user"]["name"], "Alice");
}

#[tokio::test]
async fn test_update_me_changes_name_and_password() {
    let app = TestApp::new();
    let account = app.register("rename@example.com", "vendor", "Old Name").await;

    let resp = app
        .put(
            "/auth/me",
            Some(&account.token),
            &json!({ "name": "New Name", "password": "brand-new-pass" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["user"]["name"], "New Name");
    let new_token = resp.body["token"].as_str().unwrap().to_owned();

    // The old token still works and sees the stored name.
    let me = app.get("/auth/me", Some(&account.token)).await;
    assert_eq!(me.body["user"]["name"], "New Name");
    let me = app.get("/auth/me", Some(&new_token)).await;
    assert_eq!(me.body["user"]["name"], "New Name");

    let old_login = app
        .post(
            "/auth/login",
            None,
            &json!({ "email": "rename@example.com", "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(old_login.status, StatusCode::UNAUTHORIZED);
    app.login("rename@example.com", "brand-new-pass").await;
}

#[tokio::test]
async fn test_update_me_rejects_empty_body() {
    let app = TestApp::new();
    let account = app.register("empty@example.com", "customer", "Empty").await;

    let resp = app.put("/auth/me", Some(&account.token), &json!({})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error(), Some("Nothing to update"));
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_category_catalog_is_public() {
    let app = TestApp::new();
    let resp = app.get("/categories/list", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    let categories = resp.body["categories"].as_array().unwrap();
    assert!(!categories.is_empty());

    // A bad token on a public route is ignored, not rejected.
    let resp = app.get("/categories/list", Some("garbage")).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_categories_in_use_requires_token() {
    let app = TestApp::new();
    let resp = app.get("/categories", None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Cross-cutting
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let resp = app.get("/health", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text, "ok");
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = TestApp::new();
    let resp = app.get("/health", None).await;

    assert_eq!(resp.headers["x-frame-options"], "DENY");
    assert_eq!(resp.headers["x-content-type-options"], "nosniff");
    assert_eq!(resp.headers["cache-control"], "no-store");
    assert!(resp.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-12345")
        .body(Body::empty())
        .unwrap();

    let resp = app.send(request).await;
    assert_eq!(resp.headers["x-request-id"], "req-12345");
}
