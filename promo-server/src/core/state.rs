use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{info, warn};

use crate::auth::{JwtService, jwt::JwtConfig};
use crate::bonus::BonusEngine;
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::{User, UserRole};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Shared server state, cheap to clone (`Arc` internals)
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded SurrealDB handle
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    /// Bonus/plan calculation engine
    pub engine: BonusEngine,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        let engine = BonusEngine::new(db.clone());
        Self {
            config,
            db,
            jwt_service,
            engine,
        }
    }

    /// Initialize in order: work directory, database, JWT service, admin
    /// bootstrap.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(config.database_dir()).map_err(|e| {
            AppError::internal(format!("Failed to create work directory: {e}"))
        })?;

        let db_service = DbService::new(&config.database_dir().join("promo.db")).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = Self::new(config.clone(), db_service.db, jwt_service);
        state.bootstrap_admin().await?;
        Ok(state)
    }

    /// In-memory state for tests
    pub async fn initialize_in_memory(config: &Config) -> AppResult<Self> {
        let db_service = DbService::new_memory().await?;
        let jwt_service = Arc::new(JwtService::with_config(JwtConfig {
            secret: "in-memory-test-secret-with-enough-length".to_string(),
            ..config.jwt.clone()
        }));
        Ok(Self::new(config.clone(), db_service.db, jwt_service))
    }

    /// Create the admin account on first start, when ADMIN_EMAIL and
    /// ADMIN_PASSWORD are configured and no such user exists yet
    async fn bootstrap_admin(&self) -> AppResult<()> {
        let (Some(email), Some(password)) =
            (&self.config.admin_email, &self.config.admin_password)
        else {
            if self.config.is_production() {
                warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin bootstrap");
            }
            return Ok(());
        };

        let users = UserRepository::new(self.db.clone());
        if users.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        let hashed = User::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
        users
            .create(User::new(email.clone(), None, hashed, UserRole::Admin))
            .await?;
        info!(email = %email, "bootstrap admin account created");
        Ok(())
    }
}
