//! Wraps bare error responses in the standard envelope.
//!
//! Handlers and extractors already answer with [`ApiResponse`] bodies. What
//! reaches this layer unwrapped comes from axum itself: 405 for a known path
//! with the wrong method, and plain-text rejections such as a malformed path
//! parameter.

use axum::{
    body::{self, Body},
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use usermanager_core::{ApiResponse, EmptyData};

const MAX_REJECTION_BODY: usize = 16 * 1024;

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn default_message(status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED => "Unauthorized. A valid bearer token is required".to_string(),
        StatusCode::FORBIDDEN => "Access denied".to_string(),
        StatusCode::NOT_FOUND => "Resource not found".to_string(),
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint".to_string(),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Content-Type must be application/json".to_string(),
        other => other
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    }
}

pub async fn envelope_error_responses(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if !response.status().is_client_error() || is_json(&response) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = body::to_bytes(body, MAX_REJECTION_BODY)
        .await
        .ok()
        .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    let message = match parts.status {
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED => {
            default_message(parts.status)
        }
        _ if !text.is_empty() => text,
        status => default_message(status),
    };

    let mut wrapped = ApiResponse::<EmptyData>::failure(message).into_response();
    *wrapped.status_mut() = parts.status;
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            wrapped.headers_mut().insert(name.clone(), value.clone());
        }
    }
    wrapped.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    wrapped
}

/// Fallback for paths no router matches.
pub async fn not_found() -> Response {
    let mut response = ApiResponse::<EmptyData>::failure(default_message(StatusCode::NOT_FOUND))
        .into_response();
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
