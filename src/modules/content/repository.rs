//! Generic persistence for course-scoped content.
//!
//! Every content type lives in its own table with the same skeleton: an
//! `id`, a `course_id` foreign key, a boolean visibility column, a set of
//! type-specific columns and timestamps. [`ScopedContent`] describes one such
//! table, and [`ContentRepository`] runs the same queries against any of them.
//!
//! The `visible` variants always filter on the visibility column and on the
//! owning course being active, and are the only ones public handlers call.

use std::fmt::Debug;
use std::marker::PhantomData;

use anyhow::anyhow;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use coursehub_core::AppError;

use crate::modules::courses::service::CourseService;

pub trait ScopedContent:
    for<'r> FromRow<'r, PgRow> + Serialize + Debug + Send + Sync + Unpin + 'static
{
    /// Body accepted by create and full replace.
    type Input: DeserializeOwned + Validate + Debug + Send + 'static;

    const TABLE: &'static str;
    /// URL segment, e.g. `teaching-assistants`.
    const COLLECTION: &'static str;
    /// Human-readable name used in error messages.
    const LABEL: &'static str;
    const VISIBILITY_COLUMN: &'static str;
    const ORDER_BY: &'static str;
    /// Columns written by create and replace, in the order `bind_values` binds them.
    const WRITABLE_COLUMNS: &'static [&'static str];

    fn bind_values<'qb, 'args: 'qb>(
        input: Self::Input,
        values: &mut Separated<'qb, 'args, Postgres, &'static str>,
    );
}

fn select_columns<T: ScopedContent>() -> String {
    format!(
        "id, course_id, {}, created_at, updated_at",
        T::WRITABLE_COLUMNS.join(", ")
    )
}

fn course_is_active<T: ScopedContent>() -> String {
    format!(
        "EXISTS (SELECT 1 FROM courses c WHERE c.id = {}.course_id AND c.is_active)",
        T::TABLE
    )
}

fn not_found<T: ScopedContent>() -> AppError {
    AppError::not_found(anyhow!("{} not found", T::LABEL))
}

fn map_write_error<T: ScopedContent>(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::bad_request(anyhow!(
            "A {} with this number already exists in this course",
            T::LABEL.to_lowercase()
        ));
    }
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return AppError::not_found(anyhow!("Course not found"));
    }
    AppError::from(e)
}

pub struct ContentRepository<T>(PhantomData<T>);

impl<T: ScopedContent> ContentRepository<T> {
    #[instrument(skip(db), fields(content = T::LABEL))]
    pub async fn list_visible(db: &PgPool, course_id: Uuid) -> Result<Vec<T>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE course_id = $1 AND {} = TRUE AND {} ORDER BY {}",
            select_columns::<T>(),
            T::TABLE,
            T::VISIBILITY_COLUMN,
            course_is_active::<T>(),
            T::ORDER_BY
        );

        let rows = sqlx::query_as::<_, T>(&query)
            .bind(course_id)
            .fetch_all(db)
            .await?;

        Ok(rows)
    }

    #[instrument(skip(db), fields(content = T::LABEL))]
    pub async fn get_visible(db: &PgPool, id: Uuid) -> Result<T, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 AND {} = TRUE AND {}",
            select_columns::<T>(),
            T::TABLE,
            T::VISIBILITY_COLUMN,
            course_is_active::<T>()
        );

        sqlx::query_as::<_, T>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(not_found::<T>)
    }

    #[instrument(skip(db), fields(content = T::LABEL))]
    pub async fn list_all(db: &PgPool, course_id: Uuid) -> Result<Vec<T>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE course_id = $1 ORDER BY {}",
            select_columns::<T>(),
            T::TABLE,
            T::ORDER_BY
        );

        let rows = sqlx::query_as::<_, T>(&query)
            .bind(course_id)
            .fetch_all(db)
            .await?;

        Ok(rows)
    }

    #[instrument(skip(db), fields(content = T::LABEL))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<T, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            select_columns::<T>(),
            T::TABLE
        );

        sqlx::query_as::<_, T>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(not_found::<T>)
    }

    #[instrument(skip(db, input), fields(content = T::LABEL))]
    pub async fn create(db: &PgPool, course_id: Uuid, input: T::Input) -> Result<T, AppError> {
        CourseService::ensure_exists(db, course_id).await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} (course_id, {}) VALUES (",
            T::TABLE,
            T::WRITABLE_COLUMNS.join(", ")
        ));
        {
            let mut values = qb.separated(", ");
            values.push_bind(course_id);
            T::bind_values(input, &mut values);
        }
        qb.push(format!(") RETURNING {}", select_columns::<T>()));

        qb.build_query_as::<T>()
            .fetch_one(db)
            .await
            .map_err(map_write_error::<T>)
    }

    /// Replaces every writable column of an existing row.
    #[instrument(skip(db, input), fields(content = T::LABEL))]
    pub async fn replace(db: &PgPool, id: Uuid, input: T::Input) -> Result<T, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "UPDATE {} SET ({}) = ROW(",
            T::TABLE,
            T::WRITABLE_COLUMNS.join(", ")
        ));
        {
            let mut values = qb.separated(", ");
            T::bind_values(input, &mut values);
        }
        qb.push("), updated_at = NOW() WHERE id = ");
        qb.push_bind(id);
        qb.push(format!(" RETURNING {}", select_columns::<T>()));

        qb.build_query_as::<T>()
            .fetch_optional(db)
            .await
            .map_err(map_write_error::<T>)?
            .ok_or_else(not_found::<T>)
    }

    #[instrument(skip(db), fields(content = T::LABEL))]
    pub async fn set_visibility(db: &PgPool, id: Uuid, visible: bool) -> Result<T, AppError> {
        let query = format!(
            "UPDATE {} SET {} = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            T::TABLE,
            T::VISIBILITY_COLUMN,
            select_columns::<T>()
        );

        sqlx::query_as::<_, T>(&query)
            .bind(visible)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(not_found::<T>)
    }

    #[instrument(skip(db), fields(content = T::LABEL))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", T::TABLE);

        let result = sqlx::query(&query).bind(id).execute(db).await?;

        if result.rows_affected() == 0 {
            return Err(not_found::<T>());
        }

        Ok(())
    }
}
