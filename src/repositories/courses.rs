use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::modules::courses::model::Course;

const COURSE_COLUMNS: &str = "id, title, description, created_at";

#[derive(Clone, Debug)]
pub struct CourseRepository {
    db: SqlitePool,
}

impl CourseRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY title, id"
        ))
        .fetch_all(&self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    #[instrument(skip(self))]
    pub async fn insert(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Course, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (title, description, created_at) VALUES (?, ?, ?)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(title)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
    }

    /// Writes `title` and `description` back. Returns `None` when no course
    /// has this id.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
    ) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET title = ?, description = ? WHERE id = ?
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(title)
        .bind(description)
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM user_courses WHERE course_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
