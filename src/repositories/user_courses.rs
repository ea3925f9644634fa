use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

/// Queries over the `user_courses` join table.
#[derive(Clone, Debug)]
pub struct UserCourseRepository {
    db: SqlitePool,
}

impl UserCourseRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Inserts the pair. A second enrollment of the same pair fails with a
    /// unique violation.
    #[instrument(skip(self))]
    pub async fn enroll(&self, user_id: &str, course_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO user_courses (user_id, course_id, enrolled_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(course_id)
            .bind(Utc::now())
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// Returns `false` when the user was not enrolled.
    #[instrument(skip(self))]
    pub async fn unenroll(&self, user_id: &str, course_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_courses WHERE user_id = ? AND course_id = ?")
            .bind(user_id)
            .bind(course_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn user_ids_for_course(&self, course_id: i64) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT user_id FROM user_courses WHERE course_id = ? ORDER BY user_id",
        )
        .bind(course_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Course titles one user is enrolled in, alphabetical.
    pub async fn titles_for_user(&self, user_id: &str) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT c.title FROM user_courses uc
             JOIN courses c ON c.id = uc.course_id
             WHERE uc.user_id = ?
             ORDER BY c.title",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(|(title,)| title).collect())
    }
}
