use std::sync::Arc;

use sqlx::PgPool;

use coursehub_cache::CacheConfig;
use coursehub_config::{CorsConfig, JwtConfig};
use coursehub_db::{DatabaseConfig, init_db_pool};

use crate::middleware::auth::PrincipalGate;
use crate::middleware::store::PgPrincipalStore;
use crate::modules::auth::provider::IdentityProvider;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub gate: Arc<PrincipalGate>,
    /// External sign-in is disabled when unset
    pub identity_provider: Option<Arc<dyn IdentityProvider>>,
}

impl AppState {
    /// Builds the state around an existing pool. The gate gets its own
    /// principal cache; call `gate.spawn_sweeper()` to start eviction.
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        cache_config: &CacheConfig,
    ) -> Self {
        let store = Arc::new(PgPrincipalStore::new(db.clone()));
        let gate = Arc::new(PrincipalGate::new(store, jwt_config.clone(), cache_config));

        Self {
            db,
            jwt_config,
            cors_config,
            gate,
            identity_provider: None,
        }
    }

    pub fn with_identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db_config = DatabaseConfig::from_env()?;
    let db = init_db_pool(&db_config).await?;

    Ok(AppState::new(
        db,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        &CacheConfig::from_env(),
    ))
}
