use axum::{Router, middleware, routing::get};

use crate::middleware::content_type::require_json_content_type;
use crate::state::AppState;

use super::controller::{create_course, delete_course, get_course, get_courses, update_course};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_courses)
                .post(create_course)
                .route_layer(middleware::from_fn(require_json_content_type)),
        )
        .route(
            "/{id}",
            get(get_course)
                .put(update_course)
                .delete(delete_course)
                .route_layer(middleware::from_fn(require_json_content_type)),
        )
}
