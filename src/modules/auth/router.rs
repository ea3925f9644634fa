use axum::{Router, middleware, routing::post};

use crate::middleware::content_type::require_json_content_type;
use crate::state::AppState;

use super::controller::{login, register};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(register).route_layer(middleware::from_fn(require_json_content_type)),
        )
        .route(
            "/login",
            post(login).route_layer(middleware::from_fn(require_json_content_type)),
        )
}
