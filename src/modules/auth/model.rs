use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::{UserSummary, validate_username_length};

/// Registration payload.
///
/// Every field defaults when absent so a missing field is reported as a
/// field-level validation message rather than a parse failure.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUserDto {
    #[serde(default, deserialize_with = "usermanager_core::serde::deserialize_trimmed")]
    #[validate(
        length(min = 1, message = "Username is required"),
        custom(function = "validate_username_length")
    )]
    pub username: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email address is invalid")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(
        required(message = "Age is required"),
        range(min = 0, max = 150, message = "Age must be between 0 and 150")
    )]
    pub age: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[serde(default)]
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    pub user: UserSummary,
    pub roles: Vec<String>,
}
