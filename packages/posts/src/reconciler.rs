// ABOUTME: Tag reconciler that makes a post's links match a desired tag list
// ABOUTME: Creates missing tags on demand and rewrites post_tags rows

//! Both entry points run on a caller-supplied connection, normally the
//! transaction wrapping the whole create or update, so a failure part way
//! through leaves neither the post nor its links half written.
//!
//! An existing tag name always wins over a supplied id. Names are trimmed
//! and resolved once per call: repeated or blank names are skipped.

use std::collections::HashSet;

use sqlx::SqliteConnection;
use tracing::debug;

use crate::storage::{link_tag, unlink_all_tags};
use crate::types::TagDescriptor;
use postboard_storage::{StorageError, StorageResult};
use postboard_tags::{find_tag_by_name, insert_tag_if_absent, Tag};

/// Create path: link `post_id` to every name, minting fresh ids for new tags.
///
/// Existing links are kept, so running it twice with the same names
/// leaves the same link set.
pub async fn link_tag_names(
    conn: &mut SqliteConnection,
    post_id: &str,
    names: &[String],
) -> StorageResult<Vec<Tag>> {
    let mut linked = Vec::new();

    for name in distinct_names(names.iter().map(String::as_str)) {
        let tag = match find_tag_by_name(conn, name).await? {
            Some(tag) => tag,
            None => ensure_tag(conn, &postboard_core::generate_tag_id(), name).await?,
        };

        link_tag(conn, post_id, &tag.id).await?;
        linked.push(tag);
    }

    debug!("Linked {} tags to post {}", linked.len(), post_id);
    Ok(linked)
}

/// Update path: drop every link of `post_id`, then link the descriptors.
///
/// A descriptor naming an unknown tag creates it under the descriptor's own
/// id, falling back to a fresh id when none was supplied.
pub async fn replace_tags(
    conn: &mut SqliteConnection,
    post_id: &str,
    descriptors: &[TagDescriptor],
) -> StorageResult<Vec<Tag>> {
    let removed = unlink_all_tags(conn, post_id).await?;
    debug!("Removed {} links from post {}", removed, post_id);

    let mut seen = HashSet::new();
    let mut linked = Vec::new();

    for descriptor in descriptors {
        let name = descriptor.name.trim();
        if name.is_empty() || !seen.insert(name) {
            continue;
        }

        let tag = match find_tag_by_name(conn, name).await? {
            Some(tag) => tag,
            None => {
                let tag_id = descriptor
                    .id
                    .as_deref()
                    .filter(|id| !id.trim().is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(postboard_core::generate_tag_id);
                ensure_tag(conn, &tag_id, name).await?
            }
        };

        link_tag(conn, post_id, &tag.id).await?;
        linked.push(tag);
    }

    debug!("Linked {} tags to post {}", linked.len(), post_id);
    Ok(linked)
}

/// Insert `(tag_id, name)` unless the name exists, then return whichever
/// row owns the name.
async fn ensure_tag(conn: &mut SqliteConnection, tag_id: &str, name: &str) -> StorageResult<Tag> {
    if !insert_tag_if_absent(conn, tag_id, name).await? {
        debug!("Tag '{}' already exists, using stored id", name);
    }

    find_tag_by_name(conn, name).await?.ok_or_else(|| {
        StorageError::Database(format!("Tag '{}' missing right after insert", name))
    })
}

fn distinct_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    names
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .collect()
}
