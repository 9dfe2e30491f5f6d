// ABOUTME: Tag management for Postboard posts
// ABOUTME: Provides types and storage layer for uniquely named tags

pub mod storage;
pub mod types;

// Re-export main types
pub use storage::{find_tag_by_name, insert_tag_if_absent, TagStorage};
pub use types::{Tag, TagCreateInput};
