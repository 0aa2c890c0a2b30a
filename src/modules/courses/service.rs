use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use coursehub_core::AppError;
use coursehub_models::{Course, CourseInput};

const COURSE_COLUMNS: &str =
    "id, code, title, description, semester, instructor, is_active, created_at, updated_at";

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::bad_request(anyhow!("A course with this code already exists"));
    }
    AppError::from(e)
}

fn course_not_found() -> AppError {
    AppError::not_found(anyhow!("Course not found"))
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn list_active(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE is_active = TRUE ORDER BY code ASC"
        ))
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get_active(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 AND is_active = TRUE"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(course_not_found)
    }

    #[instrument(skip(db))]
    pub async fn list_all(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY code ASC"
        ))
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(course_not_found)
    }

    /// Fails with 404 unless a course with `id` exists, active or not.
    #[instrument(skip(db))]
    pub async fn ensure_exists(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(course_not_found());
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CourseInput) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (code, title, description, semester, instructor, is_active)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(dto.code.trim().to_uppercase())
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.semester)
        .bind(&dto.instructor)
        .bind(dto.is_active)
        .fetch_one(db)
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(db))]
    pub async fn replace(db: &PgPool, id: Uuid, dto: CourseInput) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET code = $1, title = $2, description = $3, semester = $4,
                 instructor = $5, is_active = $6, updated_at = NOW()
             WHERE id = $7
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(dto.code.trim().to_uppercase())
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.semester)
        .bind(&dto.instructor)
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(course_not_found)
    }

    /// Deletes the course; its content cascades, feedback keeps a null course.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(course_not_found());
        }

        Ok(())
    }
}
