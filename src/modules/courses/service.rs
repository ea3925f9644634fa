use anyhow::{Context, anyhow};
use tracing::instrument;
use usermanager_core::AppError;
use usermanager_db::is_unique_violation;

use crate::repositories::{CourseRepository, UserCourseRepository};

use super::model::{Course, CourseDetails, CreateCourseDto, UpdateCourseDto};

fn duplicate_title_or_database(e: sqlx::Error, context: &'static str) -> AppError {
    if is_unique_violation(&e) {
        AppError::conflict(anyhow!("A course with this title already exists"))
    } else {
        AppError::database(anyhow::Error::new(e).context(context))
    }
}

#[derive(Clone, Debug)]
pub struct CourseService {
    courses: CourseRepository,
    enrollments: UserCourseRepository,
}

impl CourseService {
    pub fn new(courses: CourseRepository, enrollments: UserCourseRepository) -> Self {
        Self {
            courses,
            enrollments,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_course(&self, dto: CreateCourseDto) -> Result<Course, AppError> {
        self.courses
            .insert(&dto.title, dto.description.as_deref())
            .await
            .map_err(|e| duplicate_title_or_database(e, "Failed to create course"))
    }

    #[instrument(skip(self))]
    pub async fn get_courses(&self) -> Result<Vec<Course>, AppError> {
        self.courses
            .find_all()
            .await
            .context("Failed to fetch courses")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    pub async fn get_course(&self, id: i64) -> Result<CourseDetails, AppError> {
        let course = self.find_course(id).await?;
        let user_ids = self
            .enrollments
            .user_ids_for_course(course.id)
            .await
            .context("Failed to fetch course enrollments")
            .map_err(AppError::database)?;

        Ok(CourseDetails::from_course(course, user_ids))
    }

    #[instrument(skip(self))]
    pub async fn update_course(&self, id: i64, dto: UpdateCourseDto) -> Result<Course, AppError> {
        let current = self.find_course(id).await?;

        let title = dto.title.unwrap_or(current.title);
        let description = dto.description.or(current.description);

        self.courses
            .update(id, &title, description.as_deref())
            .await
            .map_err(|e| duplicate_title_or_database(e, "Failed to update course"))?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    #[instrument(skip(self))]
    pub async fn delete_course(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .courses
            .delete(id)
            .await
            .context("Failed to delete course")
            .map_err(AppError::database)?;

        if !deleted {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }

        Ok(())
    }

    async fn find_course(&self, id: i64) -> Result<Course, AppError> {
        self.courses
            .find_by_id(id)
            .await
            .context("Failed to fetch course")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }
}
