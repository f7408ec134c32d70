//! Shared state for the API router.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;
use serde::Serialize;

use crate::config::ClinicConfig;
use crate::db;
use crate::db::StoreError;
use crate::dualwrite::Coordinator;

/// Shared context for all API routes. Cheap to clone; everything inside
/// is immutable after construction.
///
/// Each request opens its own store connection, so one request's store
/// call never blocks another request's progress.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<ClinicConfig>,
    pub coordinator: Arc<Coordinator>,
    db_path: Arc<PathBuf>,
}

impl ApiContext {
    pub fn new(config: ClinicConfig) -> Self {
        let coordinator = Coordinator::new(&config);
        let db_path = config.db_path.clone();
        Self {
            config: Arc::new(config),
            coordinator: Arc::new(coordinator),
            db_path: Arc::new(db_path),
        }
    }

    /// Open a store connection for the current request.
    pub fn open_db(&self) -> Result<Connection, StoreError> {
        db::open_database(&self.db_path)
    }
}

/// Plain confirmation body (`{"message": "Deleted"}` and friends).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
