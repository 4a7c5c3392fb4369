use std::sync::Arc;

use anyhow::Context;
use tenantry_config::{ConfigError, CorsConfig, DatabaseConfig, JwtConfig};
use tenantry_db::{AccountStore, MemoryStore, PgStore, UserStore, init_db_pool};
use tracing::{info, warn};

use crate::middleware::TokenGate;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub accounts: Arc<dyn AccountStore>,
    pub token_gate: TokenGate,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds state around a store implementing both collaborator traits.
    pub fn new<S>(
        store: Arc<S>,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
    ) -> Result<Self, ConfigError>
    where
        S: UserStore + AccountStore + 'static,
    {
        Ok(Self {
            users: store.clone(),
            accounts: store,
            token_gate: TokenGate::new(jwt_config)?,
            cors_config,
        })
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        self.token_gate.config()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("token_gate", &self.token_gate)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Loads configuration from the environment and connects the store.
///
/// Falls back to the in-memory store when `DATABASE_URL` is unset.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env().context("invalid token configuration")?;
    let cors_config = CorsConfig::from_env();
    let database_config = DatabaseConfig::from_env().context("invalid database configuration")?;

    let state = if database_config.url.is_some() {
        let pool = init_db_pool(&database_config)
            .await
            .context("failed to connect to database")?;
        let store = PgStore::new(pool);

        if database_config.run_migrations {
            store.migrate().await.context("failed to run migrations")?;
            info!("Database migrations applied");
        }

        AppState::new(Arc::new(store), jwt_config, cors_config)?
    } else {
        warn!("DATABASE_URL not set, using in-memory store; data will not survive a restart");
        AppState::new(Arc::new(MemoryStore::new()), jwt_config, cors_config)?
    };

    Ok(state)
}
