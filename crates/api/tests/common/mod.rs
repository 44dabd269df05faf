#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use hyra_api::auth::jwt::JwtConfig;
use hyra_api::config::ServerConfig;
use hyra_api::identity::{IdentityProvider, PgIdentityProvider};
use hyra_api::routes;
use hyra_api::state::AppState;
use hyra_api::storage::{DiskObjectStore, ObjectStore};

/// Build a test `ServerConfig` with safe defaults and a per-app storage root.
pub fn test_config() -> ServerConfig {
    let storage_root = std::env::temp_dir().join(format!("hyra-test-{}", uuid::Uuid::new_v4()));
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 120,
            refresh_token_expiry_days: 7,
        },
        storage_root,
        public_base_url: "http://localhost:3000".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let identity: Arc<dyn IdentityProvider> =
        Arc::new(PgIdentityProvider::new(pool.clone(), config.jwt.clone()));
    let store: Arc<dyn ObjectStore> = Arc::new(DiskObjectStore::new(
        config.storage_root.clone(),
        config.public_base_url.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        identity,
        store,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should be handled")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::get(uri).body(Body::empty()).expect("valid request");
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, cookies: &str) -> Response {
    let request = Request::get(uri)
        .header(COOKIE, cookies)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookies: &str,
) -> Response {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookies)
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookies: &str,
) -> Response {
    let request = Request::patch(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookies)
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, cookies: &str) -> Response {
    let request = Request::delete(uri)
        .header(COOKIE, cookies)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

/// Build a `POST /properties/upload-image` multipart request.
pub fn multipart_request(
    uri: &str,
    cookies: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let boundary = "hyra-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(COOKIE, cookies)
        .body(Body::from(body))
        .expect("valid request")
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Consume a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Collect the `Set-Cookie` pairs of a response into a `Cookie` header value.
pub fn session_cookies(response: &Response) -> String {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|s| s.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Scenario helpers
// ---------------------------------------------------------------------------

/// Register a user and log them in, returning the session cookie header.
pub async fn register_and_login(app: &Router, name: &str, email: &str) -> String {
    let password = "hemligt123";

    let response = post_json(
        app.clone(),
        "/auth/register",
        serde_json::json!({ "name": name, "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app.clone(),
        "/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    session_cookies(&response)
}

/// Create a property for the given session, returning its id.
pub async fn create_property(app: &Router, cookies: &str, name: &str, price: f64) -> String {
    let response = post_json_auth(
        app.clone(),
        "/properties",
        serde_json::json!({ "name": name, "location": "Visby", "price_per_night": price }),
        cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["property"]["id"]
        .as_str()
        .expect("property id should be a string")
        .to_string()
}
