#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use tablero_api::auth::jwt::JwtConfig;
use tablero_api::auth::password::hash_password;
use tablero_api::config::ServerConfig;
use tablero_api::router::build_app_router;
use tablero_api::state::AppState;
use tablero_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user with an Argon2id-hashed password, returning its id.
pub async fn seed_user(pool: &PgPool, email: &str, password: &str, role: &str) -> DbId {
    let hash = hash_password(password).expect("hashing should succeed");
    sqlx::query_scalar::<_, DbId>(
        "INSERT INTO users (email, name, password_hash, role)
         VALUES ($1, NULL, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(hash)
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("seed user")
}

/// Log in through the API and return the `(access_token, refresh_token)` pair.
pub async fn login(app: &Router, email: &str, password: &str) -> (String, String) {
    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    (
        json["access_token"].as_str().expect("access_token").to_string(),
        json["refresh_token"].as_str().expect("refresh_token").to_string(),
    )
}

/// Issue a GET request, optionally with a Bearer token.
pub async fn get_with_token(
    app: Router,
    uri: &str,
    token: Option<&str>,
) -> Response<axum::body::Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).expect("request");
    app.oneshot(request).await.expect("response")
}

/// Issue an unauthenticated GET request.
pub async fn get(app: Router, uri: &str) -> Response<axum::body::Body> {
    get_with_token(app, uri, None).await
}

/// Issue a JSON POST request, optionally with a Bearer token.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<axum::body::Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<axum::body::Body>) -> Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}
