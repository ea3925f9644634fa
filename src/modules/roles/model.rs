use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Role that unlocks role management endpoints.
pub const ADMIN_ROLE: &str = "Admin";
/// Role guaranteed to exist once anyone has registered.
pub const DEFAULT_ROLE: &str = "User";

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A role with the ids of every user holding it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct RoleDetails {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub user_ids: Vec<String>,
}

impl RoleDetails {
    pub fn from_role(role: Role, user_ids: Vec<String>) -> Self {
        Self {
            id: role.id,
            name: role.name,
            created_at: role.created_at,
            user_ids,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoleDto {
    #[serde(default, deserialize_with = "usermanager_core::serde::deserialize_trimmed")]
    #[validate(length(min = 1, max = 64, message = "Role name must be 1-64 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleDto {
    #[serde(default, deserialize_with = "usermanager_core::serde::deserialize_trimmed")]
    #[validate(length(min = 1, max = 64, message = "Role name must be 1-64 characters"))]
    pub name: String,
}
