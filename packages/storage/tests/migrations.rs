// ABOUTME: Integration tests for database setup
// ABOUTME: Verifies the schema, constraints and file-backed connection setup

use postboard_storage::test_utils::memory_pool;
use postboard_storage::{connect, migrate, StorageConfig};
use sqlx::Row;

#[tokio::test]
async fn test_schema_tables_exist() {
    let pool = memory_pool().await;

    let rows = sqlx::query(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('posts', 'tags', 'post_tags') ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let names: Vec<String> = rows.iter().map(|r| r.get("name")).collect();
    assert_eq!(names, vec!["post_tags", "posts", "tags"]);
}

#[tokio::test]
async fn test_tag_name_is_unique() {
    let pool = memory_pool().await;

    sqlx::query("INSERT INTO tags (id, name) VALUES ('t1', 'news')")
        .execute(&pool)
        .await
        .unwrap();

    let duplicate = sqlx::query("INSERT INTO tags (id, name) VALUES ('t2', 'news')")
        .execute(&pool)
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_post_tag_pair_is_unique() {
    let pool = memory_pool().await;

    sqlx::query("INSERT INTO posts (id, title) VALUES ('p1', 'Hello')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO tags (id, name) VALUES ('t1', 'news')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ('p1', 't1')")
        .execute(&pool)
        .await
        .unwrap();

    let duplicate = sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ('p1', 't1')")
        .execute(&pool)
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_deleting_post_cascades_to_links() {
    let pool = memory_pool().await;

    sqlx::query("INSERT INTO posts (id, title) VALUES ('p1', 'Hello')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO tags (id, name) VALUES ('t1', 'news')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ('p1', 't1')")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("DELETE FROM posts WHERE id = 'p1'")
        .execute(&pool)
        .await
        .unwrap();

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_tags")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links, 0);
}

#[tokio::test]
async fn test_connect_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postboard.db");
    let config = StorageConfig {
        database_url: format!("sqlite:{}", path.display()),
        max_connections: 2,
        busy_timeout_seconds: 5,
    };

    let pool = connect(&config).await.unwrap();
    assert!(path.exists());

    // Migrations are idempotent
    migrate(&pool).await.unwrap();
    pool.close().await;
}
