// ABOUTME: Data layer plumbing for Postboard
// ABOUTME: SQLite pool setup, embedded migrations and the shared storage error type

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: postboard_core::DEFAULT_DATABASE_URL.to_string(),
            max_connections: postboard_core::DEFAULT_MAX_CONNECTIONS,
            busy_timeout_seconds: 30,
        }
    }
}

/// Open a connection pool for `config` and bring the schema up to date
pub async fn connect(config: &StorageConfig) -> StorageResult<SqlitePool> {
    debug!("Connecting to database: {}", config.database_url);

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(StorageError::Sqlx)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(config.busy_timeout_seconds));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    info!("Database connection established");

    migrate(&pool).await?;

    Ok(pool)
}

/// Apply the embedded migrations
pub async fn migrate(pool: &SqlitePool) -> StorageResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(StorageError::Migration)?;

    debug!("Database migrations completed");
    Ok(())
}
