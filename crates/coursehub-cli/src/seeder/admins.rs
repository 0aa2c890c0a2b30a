use anyhow::{Context, bail};
use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::hash_password;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Inserts an active administrator with a bcrypt-hashed password.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let name = name.trim();
    let email = email.trim().to_lowercase();

    if name.is_empty() {
        bail!("Name must not be empty");
    }
    if !email.contains('@') {
        bail!("'{email}' is not a valid email address");
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        bail!("Password must be at least {MIN_PASSWORD_LENGTH} characters");
    }

    let password_hash = hash_password(password).map_err(|e| e.error)?;

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO admins (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            return anyhow::anyhow!("An administrator with email {email} already exists");
        }
        anyhow::Error::from(e)
    })
    .context("Failed to create administrator")?;

    Ok(id)
}
