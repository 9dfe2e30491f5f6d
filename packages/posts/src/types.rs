// ABOUTME: Post type definitions
// ABOUTME: Stored post rows, the tagged read-back view and create/update inputs

use postboard_tags::Tag;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored post row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: String,
    pub img: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// A post together with the tags currently linked to it.
///
/// `tags` is `None` (serialized as `null`) when the post has no links, never
/// an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithTags {
    #[serde(flatten)]
    pub post: Post,
    pub tags: Option<Vec<Tag>>,
}

impl PostWithTags {
    pub fn new(post: Post, tags: Vec<Tag>) -> Self {
        let tags = if tags.is_empty() { None } else { Some(tags) };
        Self { post, tags }
    }
}

/// Read-back returned by create and update.
///
/// Requests that carried no tags get the bare row without a `tags` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PostView {
    Bare(Post),
    Tagged(PostWithTags),
}

impl PostView {
    pub fn post(&self) -> &Post {
        match self {
            PostView::Bare(post) => post,
            PostView::Tagged(tagged) => &tagged.post,
        }
    }

    pub fn tags(&self) -> Option<&[Tag]> {
        match self {
            PostView::Bare(_) => None,
            PostView::Tagged(tagged) => tagged.tags.as_deref(),
        }
    }
}

/// Desired tag on the update path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct PostCreateInput {
    pub id: String,
    pub img: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub tag_names: Option<Vec<String>>,
}

/// Fields left as `None` keep their stored value
#[derive(Debug, Clone, Default)]
pub struct PostUpdateInput {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<TagDescriptor>>,
}
