//! Server state
//!
//! Holds shared service handles. Cloning is shallow (Arc and pool
//! clones), so handlers receive the state by value.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::blob::{BlobStore, FsBlobStore, MemoryBlobStore};
use crate::services::clock::{Clock, SystemClock};
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub clock: Arc<dyn Clock>,
    pub blob: Arc<dyn BlobStore>,
}

impl ServerState {
    /// Production state: file database, wall clock, filesystem blobs.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            crate::utils::AppError::internal(format!("Cannot create work dir: {e}"))
        })?;

        let db = DbService::new(&config.database_path).await?;
        let blob = FsBlobStore::new(&config.work_dir)?;

        Ok(Self {
            config: config.clone(),
            db,
            clock: Arc::new(SystemClock),
            blob: Arc::new(blob),
        })
    }

    /// Test state: in-memory database and blob store, pinned clock.
    pub async fn for_tests(clock: impl Clock + 'static) -> AppResult<Self> {
        Ok(Self {
            config: Config {
                work_dir: "/tmp/geopoint-test".into(),
                http_port: 0,
                database_path: ":memory:".into(),
                log_level: "debug".into(),
                log_to_file: false,
            },
            db: DbService::in_memory().await?,
            clock: Arc::new(clock),
            blob: Arc::new(MemoryBlobStore::default()),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
