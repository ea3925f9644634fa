use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use usermanager_core::{ApiResponse, AppError, EmptyData, FieldError};

use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateRoleDto, Role, RoleDetails, UpdateRoleDto};

#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = ApiResponse<Role>),
        (status = 400, description = "Validation failed", body = ApiResponse<Vec<FieldError>>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 403, description = "Admin role required", body = ApiResponse<EmptyData>),
        (status = 409, description = "Role name already exists", body = ApiResponse<EmptyData>)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn create_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<(StatusCode, Json<ApiResponse<Role>>), AppError> {
    let role = state.roles.create_role(dto).await?;
    Ok(ApiResponse::success(role, "Role created successfully").with_status(StatusCode::CREATED))
}

#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "All roles", body = ApiResponse<Vec<Role>>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_roles(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<ApiResponse<Vec<Role>>, AppError> {
    let roles = state.roles.get_roles().await?;
    Ok(ApiResponse::success(roles, "Roles retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role with member ids", body = ApiResponse<RoleDetails>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "Role not found", body = ApiResponse<EmptyData>)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_role(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<RoleDetails>, AppError> {
    let role = state.roles.get_role(&id).await?;
    Ok(ApiResponse::success(role, "Role retrieved successfully"))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    params(("id" = String, Path, description = "Role ID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role renamed", body = ApiResponse<Role>),
        (status = 400, description = "Validation failed", body = ApiResponse<Vec<FieldError>>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 403, description = "Admin role required", body = ApiResponse<EmptyData>),
        (status = 404, description = "Role not found", body = ApiResponse<EmptyData>),
        (status = 409, description = "Role name already exists", body = ApiResponse<EmptyData>)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<ApiResponse<Role>, AppError> {
    let role = state.roles.update_role(&id, dto).await?;
    Ok(ApiResponse::success(role, "Role updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role deleted", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 403, description = "Admin role required", body = ApiResponse<EmptyData>),
        (status = 404, description = "Role not found", body = ApiResponse<EmptyData>)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<ApiResponse<EmptyData>, AppError> {
    state.roles.delete_role(&id).await?;
    Ok(ApiResponse::message("Role deleted successfully"))
}
