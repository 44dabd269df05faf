//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover registration (with validation and duplicate emails), login
//! and the session cookie pair, identity reporting, and logout.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, register_and_login};
use serde_json::json;
use sqlx::PgPool;

/// Successful registration returns 201 and creates the local mirror row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/auth/register",
        json!({ "name": "Astrid", "email": "astrid@example.com", "password": "hemligt123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("astrid@example.com")
        .fetch_one(&pool)
        .await
        .expect("count query should succeed");
    assert_eq!(count, 1, "mirror row must exist");
}

/// Registration reports every failing field, not just the first.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_reports_all_invalid_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/auth/register",
        json!({ "name": "x", "email": "not-an-email", "password": "short" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation error");

    let issues = body["issues"].as_array().expect("issues array");
    let fields: Vec<&str> = issues
        .iter()
        .filter_map(|i| i["field"].as_str())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

/// The email is cleaned and lower-cased before the account is created.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_normalizes_email(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/auth/register",
        json!({ "name": "Bo", "email": "  BO@Example.COM ", "password": "hemligt123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("bo@example.com")
        .fetch_one(&pool)
        .await
        .expect("count query should succeed");
    assert_eq!(count, 1);
}

/// Registering the same email twice fails with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let payload = json!({ "name": "Astrid", "email": "astrid@example.com", "password": "hemligt123" });
    let response = post_json(app.clone(), "/auth/register", payload.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(app, "/auth/register", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Email is already registered.");
}

/// Login sets both session cookies, HTTP-only and path-scoped to root.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_sets_cookie_pair(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/auth/register",
        json!({ "name": "Astrid", "email": "astrid@example.com", "password": "hemligt123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/auth/login",
        json!({ "email": "astrid@example.com", "password": "hemligt123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<&str> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert_eq!(cookies.len(), 2, "access and refresh cookies expected");
    assert!(cookies.iter().any(|c| c.starts_with("hyra-access-token=")));
    assert!(cookies.iter().any(|c| c.starts_with("hyra-refresh-token=")));
    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"), "cookies must be HTTP-only");
        assert!(cookie.contains("Path=/"), "cookies must be root-scoped");
        assert!(cookie.contains("SameSite=Lax"));
    }

    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
}

/// Login with a wrong password fails with 400, not 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/auth/register",
        json!({ "name": "Astrid", "email": "astrid@example.com", "password": "hemligt123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/auth/login",
        json!({ "email": "astrid@example.com", "password": "fel-losenord" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid email or password.");
}

/// Login with an unknown email reads the same as a bad password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/auth/login",
        json!({ "email": "ghost@example.com", "password": "hemligt123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// /auth/me without a session answers `{"user": null}` with 200.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_without_session(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/auth/me").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["user"].is_null());
}

/// /auth/me with a session reports the provider account id.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_with_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookies = register_and_login(&app, "Astrid", "astrid@example.com").await;

    let response = get_auth(app, "/auth/me", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["user"]["id"].is_string(), "id should be a UUID string");
}

/// Logout clears both cookies with immediate expiry.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_clears_cookies(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookies = register_and_login(&app, "Astrid", "astrid@example.com").await;

    let response = common::post_json_auth(app.clone(), "/auth/logout", json!({}), &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cleared: Vec<&str> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert_eq!(cleared.len(), 2);
    for cookie in &cleared {
        assert!(cookie.contains("Max-Age=0"), "cookie must expire immediately");
    }
}

/// Requests without a session are rejected by protected endpoints.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_endpoint_requires_session(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/bookings").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
