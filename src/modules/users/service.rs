use anyhow::anyhow;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use coursehub_core::{AppError, PaginationMeta};
use coursehub_models::{ACCOUNT_COLUMNS, Account, PaginatedUsersResponse, UserFilterParams};

fn user_not_found() -> AppError {
    AppError::not_found(anyhow!("User not found"))
}

/// Appends the `WHERE` clause shared by the count and page queries.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &UserFilterParams) {
    qb.push(" WHERE 1 = 1");

    if let Some(is_active) = filters.is_active {
        qb.push(" AND is_active = ").push_bind(is_active);
    }

    if let Some(search) = filters.search.as_deref().map(str::trim)
        && !search.is_empty()
    {
        let pattern = format!("%{search}%");
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filters(&mut count_query, &filters);
        let total: i64 = count_query.build_query_scalar().fetch_one(db).await?;

        let mut page_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {ACCOUNT_COLUMNS} FROM users"));
        push_filters(&mut page_query, &filters);
        page_query
            .push(" ORDER BY created_at DESC, id ASC LIMIT ")
            .push_bind(filters.pagination.limit())
            .push(" OFFSET ")
            .push_bind(filters.pagination.offset());

        let users = page_query.build_query_as::<Account>().fetch_all(db).await?;

        Ok(PaginatedUsersResponse {
            users,
            meta: PaginationMeta::new(&filters.pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(user_not_found)
    }

    #[instrument(skip(db))]
    pub async fn set_active(db: &PgPool, id: Uuid, is_active: bool) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            "UPDATE users SET is_active = $1, updated_at = NOW() WHERE id = $2
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(is_active)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(user_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }

        Ok(())
    }
}
