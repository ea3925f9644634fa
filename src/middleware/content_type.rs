use axum::{
    extract::Request,
    http::{Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use usermanager_core::AppError;

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// Rejects POST, PUT and PATCH requests whose body is not declared as JSON.
///
/// Mounted with `route_layer` on each method router so an unmatched method
/// still gets axum's 405.
pub async fn require_json_content_type(req: Request, next: Next) -> Response {
    if carries_body(req.method()) {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        if !content_type.is_some_and(is_json) {
            return AppError::unsupported_media_type(
                "Content-Type must be application/json".to_string(),
            )
            .into_response();
        }
    }

    next.run(req).await
}
