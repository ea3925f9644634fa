use anyhow::{Context, anyhow};
use tracing::instrument;
use usermanager_core::AppError;
use usermanager_db::is_unique_violation;

use crate::repositories::RoleRepository;

use super::model::{CreateRoleDto, Role, RoleDetails, UpdateRoleDto};

fn duplicate_name_or_database(e: sqlx::Error, context: &'static str) -> AppError {
    if is_unique_violation(&e) {
        AppError::conflict(anyhow!("A role with this name already exists"))
    } else {
        AppError::database(anyhow::Error::new(e).context(context))
    }
}

#[derive(Clone, Debug)]
pub struct RoleService {
    roles: RoleRepository,
}

impl RoleService {
    pub fn new(roles: RoleRepository) -> Self {
        Self { roles }
    }

    #[instrument(skip(self))]
    pub async fn create_role(&self, dto: CreateRoleDto) -> Result<Role, AppError> {
        self.roles
            .insert(&dto.name)
            .await
            .map_err(|e| duplicate_name_or_database(e, "Failed to create role"))
    }

    #[instrument(skip(self))]
    pub async fn get_roles(&self) -> Result<Vec<Role>, AppError> {
        self.roles
            .find_all()
            .await
            .context("Failed to fetch roles")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    pub async fn get_role(&self, id: &str) -> Result<RoleDetails, AppError> {
        let role = self
            .roles
            .find_by_id(id)
            .await
            .context("Failed to fetch role")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Role not found")))?;

        let user_ids = self
            .roles
            .member_ids(&role.id)
            .await
            .context("Failed to fetch role members")
            .map_err(AppError::database)?;

        Ok(RoleDetails::from_role(role, user_ids))
    }

    #[instrument(skip(self))]
    pub async fn update_role(&self, id: &str, dto: UpdateRoleDto) -> Result<Role, AppError> {
        self.roles
            .update_name(id, &dto.name)
            .await
            .map_err(|e| duplicate_name_or_database(e, "Failed to update role"))?
            .ok_or_else(|| AppError::not_found(anyhow!("Role not found")))
    }

    #[instrument(skip(self))]
    pub async fn delete_role(&self, id: &str) -> Result<(), AppError> {
        let deleted = self
            .roles
            .delete(id)
            .await
            .context("Failed to delete role")
            .map_err(AppError::database)?;

        if !deleted {
            return Err(AppError::not_found(anyhow!("Role not found")));
        }

        Ok(())
    }
}
