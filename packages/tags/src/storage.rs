// ABOUTME: Tag storage layer using SQLite
// ABOUTME: Pool-backed CRUD plus connection-level helpers used inside transactions

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use super::types::{Tag, TagCreateInput};
use postboard_storage::{StorageError, StorageResult};

pub struct TagStorage {
    pool: SqlitePool,
}

impl TagStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all tags ordered by name
    pub async fn list_tags(&self) -> StorageResult<Vec<Tag>> {
        debug!("Fetching tags");

        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }

    /// Get a single tag by ID
    pub async fn get_tag(&self, tag_id: &str) -> StorageResult<Tag> {
        debug!("Fetching tag: {}", tag_id);

        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = ?")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or_else(|| StorageError::NotFound(format!("Tag {}", tag_id)))
    }

    /// Get a tag by name
    pub async fn get_tag_by_name(&self, name: &str) -> StorageResult<Option<Tag>> {
        let mut conn = self.pool.acquire().await.map_err(StorageError::Sqlx)?;
        find_tag_by_name(&mut conn, name).await
    }

    /// Create a new tag with a server-assigned id.
    ///
    /// Fails with the underlying unique-constraint error when the name is
    /// already taken.
    pub async fn create_tag(&self, input: TagCreateInput) -> StorageResult<Tag> {
        let tag_id = postboard_core::generate_tag_id();

        debug!("Creating tag: {} (name: {})", tag_id, input.name);

        sqlx::query("INSERT INTO tags (id, name) VALUES (?, ?)")
            .bind(&tag_id)
            .bind(&input.name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        self.get_tag(&tag_id).await
    }
}

/// Look up a tag by its unique name
pub async fn find_tag_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> StorageResult<Option<Tag>> {
    debug!("Fetching tag by name: {}", name);

    sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)
}

/// Insert `(id, name)` unless a tag with that name already exists.
///
/// Returns `true` when a row was written.
pub async fn insert_tag_if_absent(
    conn: &mut SqliteConnection,
    tag_id: &str,
    name: &str,
) -> StorageResult<bool> {
    debug!("Inserting tag: {} (name: {})", tag_id, name);

    let result = sqlx::query("INSERT INTO tags (id, name) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
        .bind(tag_id)
        .bind(name)
        .execute(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)?;

    Ok(result.rows_affected() > 0)
}
