// ABOUTME: Shared handler state: database storages and the upload store
// ABOUTME: Injected into every handler through axum state instead of globals

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;
use tracing::info;

use crate::uploads::UploadStore;
use postboard_posts::PostStorage;
use postboard_storage::{StorageConfig, StorageResult};
use postboard_tags::TagStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub post_storage: Arc<PostStorage>,
    pub tag_storage: Arc<TagStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let post_storage = Arc::new(PostStorage::new(pool.clone()));
        let tag_storage = Arc::new(TagStorage::new(pool.clone()));

        Self {
            pool,
            post_storage,
            tag_storage,
        }
    }

    /// Connect, migrate and build the storages
    pub async fn init(config: &StorageConfig) -> StorageResult<Self> {
        let pool = postboard_storage::connect(config).await?;
        info!("Database ready");
        Ok(Self::new(pool))
    }
}

/// Router state; handlers extract the part they need
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DbState,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(db: DbState, uploads: UploadStore) -> Self {
        Self { db, uploads }
    }
}
