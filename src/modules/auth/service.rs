use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use coursehub_auth::{PrincipalKind, issue_token};
use coursehub_config::JwtConfig;
use coursehub_core::{AppError, GateError, hash_password, verify_password};
use coursehub_models::{
    ACCOUNT_COLUMNS, Account, AccountCredentials, AuthResponse, LoginRequest, Principal,
    RegisterRequest, VerifiedProfile,
};

use crate::metrics::{track_login_failure, track_token_issued};
use crate::middleware::store::principal_table;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn invalid_credentials() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS.to_string())
}

fn email_taken(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::bad_request(anyhow!("An account with this email already exists"));
    }
    AppError::from(e)
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn register_student(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = dto.email.trim().to_lowercase();
        let password_hash = hash_password(&dto.password)?;

        let account = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(email_taken)?;

        let token = issue_token(account.id, PrincipalKind::User, jwt_config)?;
        track_token_issued(PrincipalKind::User);
        info!(user_id = %account.id, "Student registered");

        Ok(AuthResponse::new(
            token,
            Principal::new(PrincipalKind::User, account),
        ))
    }

    /// Password login for either kind of principal.
    #[instrument(skip(db, dto, jwt_config), fields(kind = %kind, email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        kind: PrincipalKind,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let table = principal_table(kind);
        let email = dto.email.trim().to_lowercase();

        let Some(credentials) = sqlx::query_as::<_, AccountCredentials>(&format!(
            "SELECT {ACCOUNT_COLUMNS}, password_hash FROM {table} WHERE email = $1"
        ))
        .bind(&email)
        .fetch_optional(db)
        .await?
        else {
            track_login_failure(kind, "unknown_email");
            return Err(invalid_credentials());
        };

        // Accounts provisioned through an external identity have no password
        let Some(password_hash) = credentials.password_hash.as_deref() else {
            track_login_failure(kind, "no_password");
            return Err(AppError::unauthorized(
                "This account does not support password login".to_string(),
            ));
        };

        if !verify_password(&dto.password, password_hash)? {
            track_login_failure(kind, "bad_password");
            return Err(invalid_credentials());
        }

        Self::complete_login(db, kind, credentials.account, jwt_config).await
    }

    /// Signs in with a profile an external identity provider has verified.
    ///
    /// The account is found by `external_id`. A student signing in for the
    /// first time gets an account without a password; administrators are
    /// never created this way and must already be linked.
    #[instrument(skip(db, profile, jwt_config), fields(kind = %kind, external_id = %profile.external_id))]
    pub async fn login_external(
        db: &PgPool,
        kind: PrincipalKind,
        profile: VerifiedProfile,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let table = principal_table(kind);

        let existing = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM {table} WHERE external_id = $1"
        ))
        .bind(&profile.external_id)
        .fetch_optional(db)
        .await?;

        let account = match (existing, kind) {
            (Some(account), _) => account,
            (None, PrincipalKind::User) => Self::create_external_student(db, &profile).await?,
            (None, PrincipalKind::Admin) => {
                track_login_failure(kind, "unlinked_identity");
                return Err(AppError::unauthorized(
                    "No account is linked to this identity".to_string(),
                ));
            }
        };

        Self::complete_login(db, kind, account, jwt_config).await
    }

    async fn create_external_student(
        db: &PgPool,
        profile: &VerifiedProfile,
    ) -> Result<Account, AppError> {
        // A concurrent first sign-in with the same identity loses the insert
        // and picks up the winner's row.
        let created = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO users (name, email, external_id)
             VALUES ($1, $2, $3)
             ON CONFLICT (external_id) DO NOTHING
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(profile.name.trim())
        .bind(profile.email.trim().to_lowercase())
        .bind(&profile.external_id)
        .fetch_optional(db)
        .await
        .map_err(email_taken)?;

        if let Some(account) = created {
            info!(user_id = %account.id, "Student created from external identity");
            return Ok(account);
        }

        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE external_id = $1"
        ))
        .bind(&profile.external_id)
        .fetch_one(db)
        .await?;

        Ok(account)
    }

    /// Rejects inactive accounts, refreshes `last_login_at` and issues a token.
    async fn complete_login(
        db: &PgPool,
        kind: PrincipalKind,
        account: Account,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        if !account.is_active {
            track_login_failure(kind, "deactivated");
            return Err(GateError::PrincipalDeactivated.into());
        }

        let account = sqlx::query_as::<_, Account>(&format!(
            "UPDATE {} SET last_login_at = NOW() WHERE id = $1 RETURNING {ACCOUNT_COLUMNS}",
            principal_table(kind)
        ))
        .bind(account.id)
        .fetch_one(db)
        .await?;

        let token = issue_token(account.id, kind, jwt_config)?;
        track_token_issued(kind);
        info!(principal_id = %account.id, "Login succeeded");

        Ok(AuthResponse::new(token, Principal::new(kind, account)))
    }
}
