use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use usermanager_core::{ApiResponse, AppError, EmptyData, FieldError};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Course, CourseDetails, CreateCourseDto, UpdateCourseDto};

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = ApiResponse<Course>),
        (status = 400, description = "Validation failed", body = ApiResponse<Vec<FieldError>>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 409, description = "Course title already exists", body = ApiResponse<EmptyData>)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn create_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), AppError> {
    let course = state.courses.create_course(dto).await?;
    Ok(ApiResponse::success(course, "Course created successfully").with_status(StatusCode::CREATED))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = ApiResponse<Vec<Course>>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_courses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<ApiResponse<Vec<Course>>, AppError> {
    let courses = state.courses.get_courses().await?;
    Ok(ApiResponse::success(courses, "Courses retrieved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course with enrolled user ids", body = ApiResponse<CourseDetails>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "Course not found", body = ApiResponse<EmptyData>)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<CourseDetails>, AppError> {
    let course = state.courses.get_course(id).await?;
    Ok(ApiResponse::success(course, "Course retrieved successfully"))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = ApiResponse<Course>),
        (status = 400, description = "Validation failed", body = ApiResponse<Vec<FieldError>>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "Course not found", body = ApiResponse<EmptyData>),
        (status = 409, description = "Course title already exists", body = ApiResponse<EmptyData>)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn update_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = state.courses.update_course(id, dto).await?;
    Ok(ApiResponse::success(course, "Course updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized", body = ApiResponse<EmptyData>),
        (status = 404, description = "Course not found", body = ApiResponse<EmptyData>)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<EmptyData>, AppError> {
    state.courses.delete_course(id).await?;
    Ok(ApiResponse::message("Course deleted successfully"))
}
