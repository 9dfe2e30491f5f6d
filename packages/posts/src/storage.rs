// ABOUTME: Post storage layer using SQLite
// ABOUTME: Handles post CRUD, post_tags links and the tagged read-back

use std::collections::HashMap;

use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::reconciler;
use crate::types::{Post, PostCreateInput, PostUpdateInput, PostView, PostWithTags};
use postboard_storage::{StorageError, StorageResult};
use postboard_tags::Tag;

pub struct PostStorage {
    pool: SqlitePool,
}

impl PostStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every post with its tags
    pub async fn list_posts(&self) -> StorageResult<Vec<PostWithTags>> {
        debug!("Fetching posts");

        let mut conn = self.pool.acquire().await.map_err(StorageError::Sqlx)?;

        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, img, title, date, description FROM posts ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)?;

        let rows = sqlx::query(
            r#"
            SELECT pt.post_id, t.id, t.name
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            ORDER BY t.name
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)?;

        let mut tags_by_post: HashMap<String, Vec<Tag>> = HashMap::new();
        for row in rows {
            let post_id: String = row.try_get("post_id").map_err(StorageError::Sqlx)?;
            tags_by_post.entry(post_id).or_default().push(Tag {
                id: row.try_get("id").map_err(StorageError::Sqlx)?,
                name: row.try_get("name").map_err(StorageError::Sqlx)?,
            });
        }

        Ok(posts
            .into_iter()
            .map(|post| {
                let tags = tags_by_post.remove(&post.id).unwrap_or_default();
                PostWithTags::new(post, tags)
            })
            .collect())
    }

    /// Get a single post with its tags
    pub async fn get_post(&self, post_id: &str) -> StorageResult<PostWithTags> {
        let mut conn = self.pool.acquire().await.map_err(StorageError::Sqlx)?;
        fetch_post_with_tags(&mut conn, post_id).await
    }

    /// Insert a post and link the requested tag names, all in one transaction
    pub async fn create_post(&self, input: PostCreateInput) -> StorageResult<PostView> {
        info!("Creating post: {}", input.id);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        sqlx::query(
            r#"
            INSERT INTO posts (id, img, title, date, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.id)
        .bind(&input.img)
        .bind(&input.title)
        .bind(&input.date)
        .bind(&input.description)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        let view = match input.tag_names.as_deref() {
            Some(names) if !names.is_empty() => {
                reconciler::link_tag_names(&mut tx, &input.id, names).await?;
                PostView::Tagged(fetch_post_with_tags(&mut tx, &input.id).await?)
            }
            _ => PostView::Bare(fetch_post(&mut tx, &input.id).await?),
        };

        tx.commit().await.map_err(StorageError::Sqlx)?;
        Ok(view)
    }

    /// Overwrite a post's fields and replace its links, all in one transaction.
    ///
    /// Fields missing from `input` are stored as NULL.
    pub async fn update_post(&self, post_id: &str, input: PostUpdateInput) -> StorageResult<PostView> {
        info!("Updating post: {}", post_id);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = ?, date = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.date)
        .bind(&input.description)
        .bind(post_id)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("Post {}", post_id)));
        }

        let descriptors = input.tags.unwrap_or_default();
        reconciler::replace_tags(&mut tx, post_id, &descriptors).await?;

        let view = if descriptors.is_empty() {
            PostView::Bare(fetch_post(&mut tx, post_id).await?)
        } else {
            PostView::Tagged(fetch_post_with_tags(&mut tx, post_id).await?)
        };

        tx.commit().await.map_err(StorageError::Sqlx)?;
        Ok(view)
    }

    /// Delete a post's links, then the post itself
    pub async fn delete_post(&self, post_id: &str) -> StorageResult<()> {
        info!("Deleting post: {}", post_id);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        unlink_all_tags(&mut tx, post_id).await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        debug!("Deleted {} post rows for {}", result.rows_affected(), post_id);
        Ok(())
    }
}

/// Link a post to a tag, ignoring an existing link
pub async fn link_tag(conn: &mut SqliteConnection, post_id: &str, tag_id: &str) -> StorageResult<()> {
    sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES (?, ?) ON CONFLICT DO NOTHING")
        .bind(post_id)
        .bind(tag_id)
        .execute(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)?;

    Ok(())
}

/// Remove every link of a post, returning how many were removed
pub async fn unlink_all_tags(conn: &mut SqliteConnection, post_id: &str) -> StorageResult<u64> {
    let result = sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)?;

    Ok(result.rows_affected())
}

/// Tags currently linked to a post, ordered by name
pub async fn fetch_post_tags(conn: &mut SqliteConnection, post_id: &str) -> StorageResult<Vec<Tag>> {
    sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name
        FROM post_tags pt
        JOIN tags t ON t.id = pt.tag_id
        WHERE pt.post_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(post_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(StorageError::Sqlx)
}

async fn fetch_post(conn: &mut SqliteConnection, post_id: &str) -> StorageResult<Post> {
    sqlx::query_as::<_, Post>("SELECT id, img, title, date, description FROM posts WHERE id = ?")
        .bind(post_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)?
        .ok_or_else(|| StorageError::NotFound(format!("Post {}", post_id)))
}

async fn fetch_post_with_tags(conn: &mut SqliteConnection, post_id: &str) -> StorageResult<PostWithTags> {
    let post = fetch_post(conn, post_id).await?;
    let tags = fetch_post_tags(conn, post_id).await?;
    Ok(PostWithTags::new(post, tags))
}
