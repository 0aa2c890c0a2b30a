use anyhow::anyhow;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use coursehub_core::AppError;
use coursehub_models::{CreateFeedbackDto, Feedback, FeedbackFilterParams};

const FEEDBACK_COLUMNS: &str = "id, user_id, course_id, subject, message, rating, created_at";
const COURSE_FOREIGN_KEY: &str = "feedback_course_id_fkey";

// The course is checked by its foreign key, so a course deleted mid-request
// still reads as missing.
fn map_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
        && db_err.constraint() == Some(COURSE_FOREIGN_KEY)
    {
        return AppError::not_found(anyhow!("Course not found"));
    }
    AppError::from(e)
}

pub struct FeedbackService;

impl FeedbackService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateFeedbackDto,
    ) -> Result<Feedback, AppError> {
        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            "INSERT INTO feedback (user_id, course_id, subject, message, rating)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {FEEDBACK_COLUMNS}"
        ))
        .bind(user_id)
        .bind(dto.course_id)
        .bind(dto.subject.trim())
        .bind(&dto.message)
        .bind(dto.rating)
        .fetch_one(db)
        .await
        .map_err(map_insert_error)?;

        Ok(feedback)
    }

    /// Newest first, optionally narrowed to one course.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: FeedbackFilterParams,
    ) -> Result<Vec<Feedback>, AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {FEEDBACK_COLUMNS} FROM feedback"));

        if let Some(course_id) = filters.course_id {
            qb.push(" WHERE course_id = ").push_bind(course_id);
        }
        qb.push(" ORDER BY created_at DESC, id ASC");

        let feedback = qb.build_query_as::<Feedback>().fetch_all(db).await?;

        Ok(feedback)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Feedback not found")));
        }

        Ok(())
    }
}
