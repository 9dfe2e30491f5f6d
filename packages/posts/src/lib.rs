// ABOUTME: Post management for Postboard
// ABOUTME: Post storage, post-tag links and the tag reconciler used by create and update

pub mod reconciler;
pub mod storage;
pub mod types;

// Re-export main types
pub use storage::PostStorage;
pub use types::{Post, PostCreateInput, PostUpdateInput, PostView, PostWithTags, TagDescriptor};
