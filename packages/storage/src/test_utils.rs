//! Test utilities for running storage code against a throwaway database

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// In-memory database with the full schema applied.
///
/// The pool holds a single connection that never expires, since every
/// SQLite `:memory:` connection is its own database.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    crate::migrate(&pool)
        .await
        .expect("failed to migrate in-memory database");

    pool
}
