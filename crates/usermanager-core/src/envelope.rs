//! Uniform response envelope.
//!
//! Every response leaving the API, success or failure, is wrapped in
//! [`ApiResponse`]:
//!
//! ```json
//! { "data": { ... }, "message": "User retrieved successfully", "success": true }
//! ```
//!
//! On failure `success` is `false` and `data` is either `null` or, for
//! validation failures, a list of [`FieldError`]s.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard wrapper for all API payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Payload. `null` for failures without field details and for
    /// operations that return nothing.
    pub data: Option<T>,
    /// Human readable description of the outcome.
    pub message: String,
    /// `true` when the request succeeded.
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            success: true,
        }
    }

    /// Successful response carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            success: false,
        }
    }

    /// Pairs the envelope with a status code so handlers can return it directly.
    pub fn with_status(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Placeholder payload type for responses that never carry data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Flattens `validator` output into field/message pairs, sorted by field
    /// name so responses are stable.
    pub fn from_validation_errors(errors: &ValidationErrors) -> Vec<Self> {
        let mut details: Vec<Self> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    Self::new(field.to_string(), message)
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));
        details
    }
}
