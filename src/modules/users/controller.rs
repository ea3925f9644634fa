use axum::extract::{Path, Query, State};
use tracing::instrument;
use usermanager_core::{
    ApiResponse, AppError, EmptyData, FieldError, PaginatedResponse, PaginationQuery,
};

use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{AssignRoleDto, EnrollCourseDto, UpdateUserDto, UserDetails};

/// List users one page at a time
#[utoipa::path(
    get,
    path = "/api/users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of users", body = ApiResponse<PaginatedResponse<UserDetails>>),
        (status = 400, description = "Page or size out of range", body = ApiResponse<Vec<FieldError>>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_paged_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(query): Query<PaginationQuery>,
) -> Result<ApiResponse<PaginatedResponse<UserDetails>>, AppError> {
    let page = state.users.get_paged_users(query).await?;
    Ok(ApiResponse::success(page, "Users retrieved successfully"))
}

/// List every user with role names and course titles
#[utoipa::path(
    get,
    path = "/api/users/all",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<UserDetails>>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_all_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<ApiResponse<Vec<UserDetails>>, AppError> {
    let users = state.users.get_all_users().await?;
    Ok(ApiResponse::success(users, "Users retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDetails>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "User not found", body = ApiResponse<EmptyData>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<UserDetails>, AppError> {
    let user = state.users.get_user_by_id(&id).await?;
    Ok(ApiResponse::success(user, "User retrieved successfully"))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDetails>),
        (status = 400, description = "Validation failed", body = ApiResponse<Vec<FieldError>>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "User not found", body = ApiResponse<EmptyData>),
        (status = 409, description = "Email or username already in use", body = ApiResponse<EmptyData>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<ApiResponse<UserDetails>, AppError> {
    let user = state.users.update_user(&id, dto).await?;
    Ok(ApiResponse::success(user, "User updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "User not found", body = ApiResponse<EmptyData>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<EmptyData>, AppError> {
    state.users.delete_user(&id).await?;
    Ok(ApiResponse::message("User deleted successfully"))
}

/// Assign a role to a user by role name. Assigning a held role is a no-op.
#[utoipa::path(
    post,
    path = "/api/users/{id}/roles",
    params(("id" = String, Path, description = "User ID")),
    request_body = AssignRoleDto,
    responses(
        (status = 200, description = "Role assigned, or already held", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "User or role not found", body = ApiResponse<EmptyData>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn assign_role(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<AssignRoleDto>,
) -> Result<ApiResponse<EmptyData>, AppError> {
    let newly_assigned = state.users.assign_role_to_user(&id, &dto.role_name).await?;

    let message = if newly_assigned {
        "Role assigned successfully"
    } else {
        "Role is already assigned to this user"
    };
    Ok(ApiResponse::message(message))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/roles/{role_name}",
    params(
        ("id" = String, Path, description = "User ID"),
        ("role_name" = String, Path, description = "Role name")
    ),
    responses(
        (status = 200, description = "Role removed", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 403, description = "Admin role required", body = ApiResponse<EmptyData>),
        (status = 404, description = "User, role or membership not found", body = ApiResponse<EmptyData>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn remove_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((id, role_name)): Path<(String, String)>,
) -> Result<ApiResponse<EmptyData>, AppError> {
    state.users.remove_role_from_user(&id, &role_name).await?;
    Ok(ApiResponse::message("Role removed successfully"))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/courses",
    params(("id" = String, Path, description = "User ID")),
    request_body = EnrollCourseDto,
    responses(
        (status = 200, description = "User enrolled", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "User or course not found", body = ApiResponse<EmptyData>),
        (status = 409, description = "Already enrolled", body = ApiResponse<EmptyData>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn enroll_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<EnrollCourseDto>,
) -> Result<ApiResponse<EmptyData>, AppError> {
    state.users.enroll_user(&id, dto.course_id).await?;
    Ok(ApiResponse::message("User enrolled successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/courses/{course_id}",
    params(
        ("id" = String, Path, description = "User ID"),
        ("course_id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "User unenrolled", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "Enrollment not found", body = ApiResponse<EmptyData>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn unenroll_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path((id, course_id)): Path<(String, i64)>,
) -> Result<ApiResponse<EmptyData>, AppError> {
    state.users.unenroll_user(&id, course_id).await?;
    Ok(ApiResponse::message("User unenrolled successfully"))
}
