//! Course data models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A course with the ids of its enrolled users.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CourseDetails {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_ids: Vec<String>,
}

impl CourseDetails {
    pub fn from_course(course: Course, user_ids: Vec<String>) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            created_at: course.created_at,
            user_ids,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[serde(default, deserialize_with = "usermanager_core::serde::deserialize_trimmed")]
    #[validate(length(min = 1, max = 128, message = "Title must be 1-128 characters"))]
    pub title: String,
    #[validate(length(max = 1024, message = "Description must not exceed 1024 characters"))]
    pub description: Option<String>,
}

/// Partial course update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[serde(default, deserialize_with = "usermanager_core::serde::deserialize_optional_trimmed")]
    #[validate(length(min = 1, max = 128, message = "Title must be 1-128 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1024, message = "Description must not exceed 1024 characters"))]
    pub description: Option<String>,
}
