use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{NewUser, User};

use super::group_by_key;

const USER_COLUMNS: &str = "id, username, email, age, password_hash, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct UserRepository {
    db: SqlitePool,
}

impl UserRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username, id"
        ))
        .fetch_all(&self.db)
        .await
    }

    /// One window of users ordered by username, with id as tie-break, and
    /// the total user count. Both reads share a transaction so the total
    /// describes the same snapshot as the window.
    #[instrument(skip(self))]
    pub async fn find_page_with_total(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<User>, i64), sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username, id LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((users, total))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ? COLLATE NOCASE"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ? COLLATE NOCASE"
        ))
        .bind(username)
        .fetch_optional(&self.db)
        .await
    }

    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn insert(&self, new_user: &NewUser) -> Result<User, sqlx::Error> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, email, age, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(new_user.age)
        .bind(&new_user.password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await
    }

    /// Writes the mutable profile fields of `user` back and bumps `updated_at`.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn update(&self, user: &User) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET username = ?, email = ?, age = ?, updated_at = ?
             WHERE id = ?
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.age)
        .bind(Utc::now())
        .bind(&user.id)
        .fetch_one(&self.db)
        .await
    }

    /// Deletes the user together with its enrollments and role memberships
    /// in one transaction. Returns whether a user row was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM user_courses WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Role names per user id, alphabetical within each user.
    pub async fn role_names_for(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, sqlx::Error> {
        group_by_key(
            &self.db,
            "SELECT ur.user_id, r.name FROM user_roles ur
             JOIN roles r ON r.id = ur.role_id
             WHERE ur.user_id IN",
            user_ids,
            "ORDER BY r.name",
        )
        .await
    }

    /// Course titles per user id, alphabetical within each user.
    pub async fn course_titles_for(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, sqlx::Error> {
        group_by_key(
            &self.db,
            "SELECT uc.user_id, c.title FROM user_courses uc
             JOIN courses c ON c.id = uc.course_id
             WHERE uc.user_id IN",
            user_ids,
            "ORDER BY c.title",
        )
        .await
    }
}
