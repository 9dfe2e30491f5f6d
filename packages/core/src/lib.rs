// ABOUTME: Core constants and utilities for Postboard
// ABOUTME: Foundational package shared by the storage, domain and API packages

pub mod constants;
pub mod utils;

// Re-export constants
pub use constants::{
    DEFAULT_DATABASE_URL, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT, DEFAULT_PUBLIC_DIR,
    DEFAULT_UPLOAD_DIR, MAX_UPLOAD_BYTES, UPLOADS_ROUTE,
};

// Re-export utilities
pub use utils::{extension_for_content_type, generate_tag_id, upload_filename};
