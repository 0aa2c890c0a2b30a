//! Administrator and student accounts.
//!
//! Both live in tables with the same shape (`admins` and `users`). The
//! password hash is only ever read by the login path through
//! [`AccountCredentials`]; everything else selects [`ACCOUNT_COLUMNS`].

use chrono::{DateTime, Utc};
use coursehub_auth::PrincipalKind;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Column list for [`Account`], without secrets.
pub const ACCOUNT_COLUMNS: &str =
    "id, name, email, external_id, is_active, created_at, updated_at, last_login_at";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Identifier at the external identity provider, for accounts linked there
    pub external_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
pub struct AccountCredentials {
    #[sqlx(flatten)]
    pub account: Account,
    pub password_hash: Option<String>,
}

/// An authenticated account together with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub kind: PrincipalKind,
    #[serde(flatten)]
    pub account: Account,
}

impl Principal {
    pub fn new(kind: PrincipalKind, account: Account) -> Self {
        Self { kind, account }
    }

    pub fn id(&self) -> Uuid {
        self.account.id
    }

    pub fn is_active(&self) -> bool {
        self.account.is_active
    }
}
