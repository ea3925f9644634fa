use axum::extract::State;
use tracing::instrument;
use usermanager_core::{ApiResponse, AppError, EmptyData, FieldError};

use crate::modules::users::model::UserSummary;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{LoginDto, LoginResponse, RegisterUserDto};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterUserDto,
    responses(
        (status = 200, description = "User registered successfully", body = ApiResponse<UserSummary>),
        (status = 400, description = "Validation error, or email/username already taken", body = ApiResponse<Vec<FieldError>>),
        (status = 415, description = "Body is not JSON", body = ApiResponse<EmptyData>),
        (status = 500, description = "Internal server error", body = ApiResponse<EmptyData>)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<ApiResponse<UserSummary>, AppError> {
    let user = state.auth.register(dto).await?;
    Ok(ApiResponse::success(user, "User registered successfully"))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Validation error", body = ApiResponse<Vec<FieldError>>),
        (status = 401, description = "Invalid credentials", body = ApiResponse<EmptyData>),
        (status = 500, description = "Internal server error", body = ApiResponse<EmptyData>)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let response = state.auth.login(dto).await?;
    Ok(ApiResponse::success(response, "Login successful"))
}
