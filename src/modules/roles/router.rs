use axum::{Router, middleware, routing::get};

use crate::middleware::content_type::require_json_content_type;
use crate::state::AppState;

use super::controller::{create_role, delete_role, get_role, get_roles, update_role};

pub fn init_roles_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_roles)
                .post(create_role)
                .route_layer(middleware::from_fn(require_json_content_type)),
        )
        .route(
            "/{id}",
            get(get_role)
                .put(update_role)
                .delete(delete_role)
                .route_layer(middleware::from_fn(require_json_content_type)),
        )
}
