// ABOUTME: HTTP request handlers for post operations
// ABOUTME: Multipart create with optional image upload, JSON update, list and delete

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::db::DbState;
use crate::error::{ApiError, ApiResult};
use crate::uploads::UploadStore;
use postboard_posts::{PostCreateInput, PostUpdateInput, TagDescriptor};

/// List all posts with their tags
pub async fn list_posts(State(db): State<DbState>) -> ApiResult<impl IntoResponse> {
    info!("Listing posts");

    let posts = db.post_storage.list_posts().await?;
    Ok(Json(posts))
}

/// Fields collected from a multipart post submission
#[derive(Debug, Default)]
struct PostForm {
    id: Option<String>,
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
    tag_names: Option<Vec<String>>,
    img: Option<String>,
}

/// Read the multipart body, storing the `img` file part as it arrives
async fn read_post_form(multipart: &mut Multipart, uploads: &UploadStore) -> ApiResult<PostForm> {
    let mut form = PostForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "img" => {
                let content_type = field.content_type().map(str::to_string);
                let has_file = field.file_name().is_some_and(|n| !n.is_empty());
                let bytes = field.bytes().await?;

                if has_file || !bytes.is_empty() {
                    if let Some(previous) = form.img.take() {
                        uploads.discard(&previous).await;
                    }
                    form.img = Some(uploads.save(content_type.as_deref(), &bytes).await?);
                }
            }
            "tagNames" | "tagNames[]" => {
                let value = field.text().await?;
                form.tag_names.get_or_insert_with(Vec::new).push(value);
            }
            "id" => form.id = Some(field.text().await?),
            "title" => form.title = Some(field.text().await?),
            "date" => form.date = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

/// Create a new post from a multipart form
pub async fn create_post(
    State(db): State<DbState>,
    State(uploads): State<UploadStore>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = read_post_form(&mut multipart, &uploads).await?;

    let Some(id) = form.id else {
        if let Some(img) = &form.img {
            uploads.discard(img).await;
        }
        return Err(ApiError::MissingField("id"));
    };

    info!(
        "Creating post '{}' with {} tags",
        id,
        form.tag_names.as_ref().map_or(0, Vec::len)
    );

    let input = PostCreateInput {
        id,
        img: form.img.clone().unwrap_or_default(),
        title: form.title,
        date: form.date,
        description: form.description,
        tag_names: form.tag_names,
    };

    match db.post_storage.create_post(input).await {
        Ok(view) => Ok((StatusCode::CREATED, Json(view))),
        Err(e) => {
            if let Some(img) = &form.img {
                uploads.discard(img).await;
            }
            Err(e.into())
        }
    }
}

/// Request body for updating a post
#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "tagNames")]
    pub tag_names: Option<Vec<TagDescriptor>>,
}

/// Update an existing post and replace its tags
pub async fn update_post(
    State(db): State<DbState>,
    Path(post_id): Path<String>,
    Json(request): Json<UpdatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Updating post: {}", post_id);

    let input = PostUpdateInput {
        title: request.title,
        date: request.date,
        description: request.description,
        tags: request.tag_names,
    };

    let view = db.post_storage.update_post(&post_id, input).await?;
    Ok(Json(view))
}

/// Delete a post and its tag links
pub async fn delete_post(
    State(db): State<DbState>,
    Path(post_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    info!("Deleting post: {}", post_id);

    db.post_storage.delete_post(&post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
