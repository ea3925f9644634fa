use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::roles::model::Role;

#[derive(Clone, Debug)]
pub struct RoleRepository {
    db: SqlitePool,
}

impl RoleRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name, created_at FROM roles ORDER BY name")
            .fetch_all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name, created_at FROM roles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    /// Role names compare case-insensitively.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, created_at FROM roles WHERE name = ? COLLATE NOCASE",
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await
    }

    #[instrument(skip(self))]
    pub async fn insert(&self, name: &str) -> Result<Role, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (id, name, created_at) VALUES (?, ?, ?)
             RETURNING id, name, created_at",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
    }

    /// Returns the role called `name`, creating it first if needed.
    #[instrument(skip(self))]
    pub async fn ensure(&self, name: &str) -> Result<Role, sqlx::Error> {
        sqlx::query("INSERT OR IGNORE INTO roles (id, name, created_at) VALUES (?, ?, ?)")
            .bind(Uuid::new_v4().to_string())
            .bind(name)
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

        self.find_by_name(name)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Renames a role. Returns `None` when no role has this id.
    #[instrument(skip(self))]
    pub async fn update_name(&self, id: &str, name: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET name = ? WHERE id = ? RETURNING id, name, created_at",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    /// Deletes a role; memberships go with it through the foreign key cascade.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM user_roles WHERE role_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn member_ids(&self, role_id: &str) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT user_id FROM user_roles WHERE role_id = ? ORDER BY user_id")
                .bind(role_id)
                .fetch_all(&self.db)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Role names held by one user, alphabetical.
    pub async fn names_for_user(&self, user_id: &str) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT r.name FROM user_roles ur
             JOIN roles r ON r.id = ur.role_id
             WHERE ur.user_id = ?
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Adds a membership. Returns `false` when it already existed.
    #[instrument(skip(self))]
    pub async fn add_member(&self, user_id: &str, role_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_roles (user_id, role_id) VALUES (?, ?)",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Removes a membership. Returns `false` when there was none.
    #[instrument(skip(self))]
    pub async fn remove_member(&self, user_id: &str, role_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = ? AND role_id = ?")
            .bind(user_id)
            .bind(role_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
