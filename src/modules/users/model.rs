//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`User`] - User row as stored, including the password hash
//! - [`UserDetails`] - User with role names and course titles flattened
//! - [`UserSummary`] - Public fields only, returned by registration and login
//!
//! # Request DTOs
//!
//! - [`UpdateUserDto`] - Partial profile update
//! - [`AssignRoleDto`] - Role assignment by name
//! - [`EnrollCourseDto`] - Course enrollment

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MAX_USERNAME_LENGTH: usize = 64;

/// Upper bound on username length, reported separately from the
/// "required" rule.
pub fn validate_username_length(username: &str) -> Result<(), ValidationError> {
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::from(format!(
            "Username must not exceed {} characters",
            MAX_USERNAME_LENGTH
        ))));
    }
    Ok(())
}

/// A user row.
///
/// Never serialized: the password hash must not leave the service layer.
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub age: i64,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values needed to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub age: i64,
    pub password_hash: String,
}

/// Public user fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub age: i64,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            age: user.age,
        }
    }
}

/// User with assigned role names and enrolled course titles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserDetails {
    pub id: String,
    pub username: String,
    pub age: i64,
    pub email: String,
    pub roles: Vec<String>,
    pub courses: Vec<String>,
}

impl UserDetails {
    pub fn from_user(user: User, roles: Vec<String>, courses: Vec<String>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            age: user.age,
            email: user.email,
            roles,
            courses,
        }
    }
}

/// Partial profile update. Absent fields are left unchanged.
///
/// A username that is blank once trimmed is rejected like a missing one.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[serde(default, deserialize_with = "usermanager_core::serde::deserialize_optional_trimmed")]
    #[validate(
        length(min = 1, message = "Username is required"),
        custom(function = "validate_username_length")
    )]
    pub username: Option<String>,
    #[serde(default)]
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignRoleDto {
    #[serde(default, deserialize_with = "usermanager_core::serde::deserialize_trimmed")]
    #[validate(length(min = 1, message = "Role name is required"))]
    pub role_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnrollCourseDto {
    #[validate(range(min = 1, message = "Course id must be positive"))]
    pub course_id: i64,
}
