// ABOUTME: HTTP request handlers for tag operations
// ABOUTME: Lists tags and creates tags with server-assigned ids

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tracing::info;

use crate::db::DbState;
use crate::error::ApiResult;
use postboard_tags::TagCreateInput;

/// List all tags
pub async fn list_tags(State(db): State<DbState>) -> ApiResult<impl IntoResponse> {
    info!("Listing tags");

    let tags = db.tag_storage.list_tags().await?;
    Ok(Json(tags))
}

/// Request body for creating a tag
#[derive(Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

/// Create a new tag
pub async fn create_tag(
    State(db): State<DbState>,
    Json(request): Json<CreateTagRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Creating tag: {}", request.name);

    let tag = db
        .tag_storage
        .create_tag(TagCreateInput { name: request.name })
        .await?;

    Ok((StatusCode::CREATED, Json(tag)))
}
