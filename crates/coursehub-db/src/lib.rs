//! # CourseHub DB
//!
//! PostgreSQL pool setup and embedded migrations for the CourseHub API.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: `10`)
//! - `DATABASE_ACQUIRE_TIMEOUT_SECONDS`: how long a query waits for a free
//!   connection before failing (default: `5`)
//!
//! # Example
//!
//! ```ignore
//! use coursehub_db::{DatabaseConfig, init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! run_migrations(&pool).await?;
//! ```

use std::env;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

/// Migrations from the workspace `migrations/` directory, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Reads the pool settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            url: env::var("DATABASE_URL")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            acquire_timeout: env::var("DATABASE_ACQUIRE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(5)),
        })
    }
}

/// Connects a PostgreSQL pool.
///
/// The acquire timeout bounds how long a request can block on an exhausted
/// pool; a timed-out acquire surfaces as `sqlx::Error::PoolTimedOut`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout.as_secs(),
        "Database pool connected"
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
