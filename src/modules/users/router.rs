use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::middleware::content_type::require_json_content_type;
use crate::state::AppState;

use super::controller::{
    assign_role, delete_user, enroll_course, get_all_users, get_paged_users, get_user,
    remove_role, unenroll_course, update_user,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_paged_users))
        .route("/all", get(get_all_users))
        .route(
            "/{id}",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .route_layer(middleware::from_fn(require_json_content_type)),
        )
        .route(
            "/{id}/roles",
            post(assign_role).route_layer(middleware::from_fn(require_json_content_type)),
        )
        .route("/{id}/roles/{role_name}", delete(remove_role))
        .route(
            "/{id}/courses",
            post(enroll_course).route_layer(middleware::from_fn(require_json_content_type)),
        )
        .route("/{id}/courses/{course_id}", delete(unenroll_course))
}
