use std::collections::HashMap;

use anyhow::{Context, anyhow};
use tracing::instrument;
use usermanager_core::{AppError, PaginatedResponse, PaginationQuery};
use usermanager_db::is_unique_violation;

use crate::modules::roles::model::Role;
use crate::repositories::Repositories;

use super::model::{UpdateUserDto, User, UserDetails};

#[derive(Clone, Debug)]
pub struct UserService {
    repos: Repositories,
}

impl UserService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    #[instrument(skip(self))]
    pub async fn get_all_users(&self) -> Result<Vec<UserDetails>, AppError> {
        let users = self
            .repos
            .users
            .find_all()
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)?;

        self.with_relations(users).await
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: &str) -> Result<UserDetails, AppError> {
        let user = self.find_user(id).await?;
        self.details(user).await
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: &str, dto: UpdateUserDto) -> Result<UserDetails, AppError> {
        let mut user = self.find_user(id).await?;

        if let Some(email) = dto.email {
            let existing = self
                .repos
                .users
                .find_by_email(&email)
                .await
                .context("Failed to check email")
                .map_err(AppError::database)?;
            if existing.is_some_and(|other| other.id != user.id) {
                return Err(AppError::conflict(anyhow!("Email is already in use")));
            }
            user.email = email;
        }

        if let Some(username) = dto.username {
            let existing = self
                .repos
                .users
                .find_by_username(&username)
                .await
                .context("Failed to check username")
                .map_err(AppError::database)?;
            if existing.is_some_and(|other| other.id != user.id) {
                return Err(AppError::conflict(anyhow!("Username is already taken")));
            }
            user.username = username;
        }

        if let Some(age) = dto.age {
            user.age = age;
        }

        let updated = self.repos.users.update(&user).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(anyhow!("Email or username is already in use"))
            } else {
                AppError::database(anyhow::Error::new(e).context("Failed to update user"))
            }
        })?;

        self.details(updated).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let deleted = self
            .repos
            .users
            .delete(id)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        if !deleted {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_paged_users(
        &self,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<UserDetails>, AppError> {
        let page = query.validate()?;

        let (users, total) = self
            .repos
            .users
            .find_page_with_total(page.size, page.offset())
            .await
            .context("Failed to fetch users page")
            .map_err(AppError::database)?;

        let items = self.with_relations(users).await?;
        Ok(PaginatedResponse::new(items, total, page))
    }

    /// Grants the named role. Returns `false` when the user already held it.
    #[instrument(skip(self))]
    pub async fn assign_role_to_user(&self, user_id: &str, role_name: &str) -> Result<bool, AppError> {
        let user = self.find_user(user_id).await?;
        let role = self.find_role_by_name(role_name).await?;

        self.repos
            .roles
            .add_member(&user.id, &role.id)
            .await
            .context("Failed to assign role")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    pub async fn remove_role_from_user(&self, user_id: &str, role_name: &str) -> Result<(), AppError> {
        let user = self.find_user(user_id).await?;
        let role = self.find_role_by_name(role_name).await?;

        let removed = self
            .repos
            .roles
            .remove_member(&user.id, &role.id)
            .await
            .context("Failed to remove role")
            .map_err(AppError::database)?;

        if !removed {
            return Err(AppError::not_found(anyhow!("User does not have this role")));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn enroll_user(&self, user_id: &str, course_id: i64) -> Result<(), AppError> {
        let user = self.find_user(user_id).await?;
        self.repos
            .courses
            .find_by_id(course_id)
            .await
            .context("Failed to fetch course")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))?;

        self.repos
            .user_courses
            .enroll(&user.id, course_id)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::conflict(anyhow!("User is already enrolled in this course"))
                } else {
                    AppError::database(anyhow::Error::new(e).context("Failed to enroll user"))
                }
            })
    }

    #[instrument(skip(self))]
    pub async fn unenroll_user(&self, user_id: &str, course_id: i64) -> Result<(), AppError> {
        let removed = self
            .repos
            .user_courses
            .unenroll(user_id, course_id)
            .await
            .context("Failed to unenroll user")
            .map_err(AppError::database)?;

        if !removed {
            return Err(AppError::not_found(anyhow!(
                "User is not enrolled in this course"
            )));
        }

        Ok(())
    }

    async fn find_user(&self, id: &str) -> Result<User, AppError> {
        self.repos
            .users
            .find_by_id(id)
            .await
            .context("Failed to fetch user")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Role, AppError> {
        self.repos
            .roles
            .find_by_name(name)
            .await
            .context("Failed to fetch role")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Role not found")))
    }

    async fn details(&self, user: User) -> Result<UserDetails, AppError> {
        let roles = self
            .repos
            .roles
            .names_for_user(&user.id)
            .await
            .context("Failed to fetch user roles")
            .map_err(AppError::database)?;
        let courses = self
            .repos
            .user_courses
            .titles_for_user(&user.id)
            .await
            .context("Failed to fetch user courses")
            .map_err(AppError::database)?;

        Ok(UserDetails::from_user(user, roles, courses))
    }

    /// Loads role names and course titles for a batch of users with two
    /// queries, preserving the input order.
    async fn with_relations(&self, users: Vec<User>) -> Result<Vec<UserDetails>, AppError> {
        let ids: Vec<String> = users.iter().map(|u| u.id.clone()).collect();

        let mut roles: HashMap<String, Vec<String>> = self
            .repos
            .users
            .role_names_for(&ids)
            .await
            .context("Failed to fetch user roles")
            .map_err(AppError::database)?;
        let mut courses: HashMap<String, Vec<String>> = self
            .repos
            .users
            .course_titles_for(&ids)
            .await
            .context("Failed to fetch user courses")
            .map_err(AppError::database)?;

        Ok(users
            .into_iter()
            .map(|user| {
                let user_roles = roles.remove(&user.id).unwrap_or_default();
                let user_courses = courses.remove(&user.id).unwrap_or_default();
                UserDetails::from_user(user, user_roles, user_courses)
            })
            .collect())
    }
}
