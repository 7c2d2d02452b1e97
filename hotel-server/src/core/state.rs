use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::pricing::PricingResolver;
use crate::reservations::{ReservationService, RoomLocks};
use crate::services::Reconciler;
use crate::utils::AppResult;

/// Shared server state
///
/// Holds the configuration, the database pool and the per-room booking
/// locks. Services are cheap to construct on demand from these handles;
/// nothing else is cached across requests.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite database service
    pub db: DbService,
    /// Per-room advisory locks shared by all booking requests
    pub room_locks: Arc<RoomLocks>,
}

impl ServerState {
    /// Open the database, run migrations and build the shared state
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            crate::utils::AppError::internal(format!(
                "Failed to create work dir {}: {e}",
                config.work_dir
            ))
        })?;

        let db = DbService::new(&config.db_path()).await?;
        Ok(Self {
            config: config.clone(),
            db,
            room_locks: Arc::new(RoomLocks::new()),
        })
    }

    /// In-memory state for tests
    pub fn from_pool(config: Config, pool: SqlitePool) -> Self {
        Self {
            config,
            db: DbService { pool },
            room_locks: Arc::new(RoomLocks::new()),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn pricing(&self) -> PricingResolver {
        PricingResolver::new(self.db.pool.clone())
    }

    pub fn reservations(&self) -> ReservationService {
        ReservationService::new(self.db.pool.clone(), self.pricing(), self.room_locks.clone())
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.db.pool.clone(), self.config.reconcile_interval())
    }
}
