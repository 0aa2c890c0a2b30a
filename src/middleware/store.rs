//! Principal lookup used by the authentication gate.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use coursehub_auth::PrincipalKind;
use coursehub_models::{ACCOUNT_COLUMNS, Account, Principal};

/// Source of truth for principal records.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Loads a principal by id, without secret fields.
    async fn find_principal(
        &self,
        kind: PrincipalKind,
        id: Uuid,
    ) -> Result<Option<Principal>, sqlx::Error>;
}

/// Table holding principals of `kind`.
pub fn principal_table(kind: PrincipalKind) -> &'static str {
    match kind {
        PrincipalKind::Admin => "admins",
        PrincipalKind::User => "users",
    }
}

/// PostgreSQL-backed principal store
#[derive(Debug, Clone)]
pub struct PgPrincipalStore {
    db: PgPool,
}

impl PgPrincipalStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalStore {
    async fn find_principal(
        &self,
        kind: PrincipalKind,
        id: Uuid,
    ) -> Result<Option<Principal>, sqlx::Error> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM {} WHERE id = $1",
            principal_table(kind)
        );

        let account = sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(account.map(|account| Principal::new(kind, account)))
    }
}
