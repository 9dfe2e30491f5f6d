// ABOUTME: Tag type definitions
// ABOUTME: Structures for the named labels attached to posts

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreateInput {
    pub name: String,
}
