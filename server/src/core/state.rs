use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::payment::StripeClient;
use crate::utils::AppError;

/// Shared application state, cloned into every handler
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | Immutable configuration |
/// | db | Surreal<Db> | Embedded database handle |
/// | jwt_service | Arc<JwtService> | Token issue/validation |
/// | payment | StripeClient | Payment-intent creation |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub payment: StripeClient,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        payment: StripeClient,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            payment,
        }
    }

    /// Initialize the state for a real run
    ///
    /// Ensures the work directory layout exists and opens the on-disk
    /// database at `work_dir/database/pizzeria.db`.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {}", e)))?;
        std::fs::create_dir_all(config.log_dir())
            .map_err(|e| AppError::internal(format!("Failed to create log directory: {}", e)))?;

        let db_path = db_dir.join("pizzeria.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let payment = StripeClient::new(config.stripe_secret_key.clone());

        Ok(Self::new(config.clone(), db_service.db, jwt_service, payment))
    }

    /// State backed by the in-memory engine, for tests
    pub async fn for_tests(config: Config) -> Result<Self, AppError> {
        let db_service = DbService::memory().await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let payment = StripeClient::new(config.stripe_secret_key.clone());
        Ok(Self::new(config, db_service.db, jwt_service, payment))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
