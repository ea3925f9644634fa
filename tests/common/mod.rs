#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;
use usermanager::cli::create_admin;
use usermanager::router::init_router;
use usermanager::state::AppState;
use usermanager_config::{CorsConfig, DatabaseConfig, EmailConfig, JwtConfig};
use usermanager_db::init_lazy_pool;
use uuid::Uuid;

pub const PASSWORD: &str = "secret";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        issuer: "usermanager".to_string(),
        audience: "usermanager-clients".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app(pool: SqlitePool) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        EmailConfig::disabled(),
        CorsConfig::parse("http://localhost:3000"),
    );
    init_router(state)
}

/// App backed by a pool that never connects, for requests rejected before
/// any query runs.
pub fn setup_router_only_app() -> Router {
    let pool = init_lazy_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .unwrap();
    setup_test_app(pool)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_username() -> String {
    format!("user-{}", Uuid::new_v4().simple())
}

/// Sends a request and returns the status with the parsed JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Registers a user through the API and returns its id.
pub async fn register(app: &Router, username: &str, email: &str, age: i64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": email,
            "password": PASSWORD,
            "age": age
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["data"]["access_token"].as_str().unwrap().to_string()
}

/// Registers a plain user and returns `(user_id, token)`.
pub async fn user_with_token(app: &Router) -> (String, String) {
    let email = generate_unique_email();
    let id = register(app, &generate_unique_username(), &email, 30).await;
    let token = login(app, &email, PASSWORD).await;
    (id, token)
}

/// Creates an admin directly in the database and returns `(user_id, token)`.
pub async fn admin_with_token(pool: &SqlitePool, app: &Router) -> (String, String) {
    let email = generate_unique_email();
    let admin = create_admin(pool, &generate_unique_username(), &email, PASSWORD, 40)
        .await
        .unwrap();
    let token = login(app, &email, PASSWORD).await;
    (admin.id, token)
}
