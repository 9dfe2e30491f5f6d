// ABOUTME: HTTP API layer for Postboard providing REST endpoints and routing
// ABOUTME: Integration layer that wires the posts and tags packages to axum

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

pub mod db;
pub mod error;
pub mod health;
pub mod posts_handlers;
pub mod tags_handlers;
pub mod uploads;

pub use db::{AppState, DbState};
pub use error::{ApiError, ApiResult};
pub use uploads::{UploadError, UploadStore};

/// Creates the posts API router
pub fn create_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts_handlers::list_posts))
        .route("/", post(posts_handlers::create_post))
        .route("/{id}", put(posts_handlers::update_post))
        .route("/{id}", delete(posts_handlers::delete_post))
        .layer(DefaultBodyLimit::max(postboard_core::MAX_UPLOAD_BYTES))
}

/// Creates the tags API router
pub fn create_tags_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags_handlers::list_tags))
        .route("/", post(tags_handlers::create_tag))
}

/// Creates the full `/api` router bound to its state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/posts", create_posts_router())
        .nest("/api/tags", create_tags_router())
        .with_state(state)
}
