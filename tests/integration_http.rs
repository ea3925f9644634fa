mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{send, setup_router_only_app};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn test_health() {
    let app = setup_router_only_app();

    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Service is healthy");
}

#[tokio::test]
async fn test_missing_token_is_enveloped() {
    let app = setup_router_only_app();

    let (status, body) = send(&app, "GET", "/api/users/all", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing authorization header");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let app = setup_router_only_app();

    let request = Request::builder()
        .uri("/api/users/all")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Invalid authorization header format");
}

#[tokio::test]
async fn test_unknown_route_is_enveloped() {
    let app = setup_router_only_app();

    let (status, body) = send(&app, "GET", "/api/nothing-here", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_wrong_method_is_enveloped() {
    let app = setup_router_only_app();

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/auth/login")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.headers().contains_key(header::ALLOW));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "HTTP method not allowed for this endpoint");
}

#[tokio::test]
async fn test_non_json_body_is_unsupported() {
    let app = setup_router_only_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("email=a@x.com"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Content-Type must be application/json");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_router_only_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_router_only_app();

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/auth/login"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_unrouted_body_method_is_not_allowed_before_content_type() {
    let app = setup_router_only_app();

    for (method, uri) in [
        ("PATCH", "/api/users/abc"),
        ("POST", "/api/users/abc"),
        ("POST", "/health"),
        ("PUT", "/api/auth/login"),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{} {}",
            method,
            uri
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "HTTP method not allowed for this endpoint");
    }
}

#[tokio::test]
async fn test_unrouted_method_with_text_body_is_not_allowed() {
    let app = setup_router_only_app();

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/roles/some-id")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("name=x"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_non_json_put_on_routed_method_is_unsupported() {
    let app = setup_router_only_app();

    let request = Request::builder()
        .method("PUT")
        .uri("/api/courses/1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
