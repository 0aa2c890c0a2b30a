use std::env;

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of admin tokens, in seconds.
    pub admin_token_expiry: i64,
    /// Lifetime of student tokens, in seconds.
    pub user_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET is not set, falling back to the development secret");
            DEFAULT_SECRET.to_string()
        });

        Self {
            secret,
            admin_token_expiry: env::var("JWT_ADMIN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 1 day
            user_token_expiry: env::var("JWT_USER_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            admin_token_expiry: 86400,
            user_token_expiry: 604800,
        }
    }
}
