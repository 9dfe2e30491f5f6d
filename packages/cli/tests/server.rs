// ABOUTME: Tests for the assembled HTTP app
// ABOUTME: Static upload serving, public fallback and CORS headers

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use postboard_api::{AppState, DbState, UploadStore};
use postboard_cli::{build_app, Config};
use postboard_storage::test_utils::memory_pool;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

async fn app_with_dirs(public: &std::path::Path, uploads: &std::path::Path) -> axum::Router {
    let public = public.display().to_string();
    let uploads = uploads.display().to_string();
    let config = Config::from_lookup(|key| match key {
        "PUBLIC_DIR" => Some(public.clone()),
        "UPLOAD_DIR" => Some(uploads.clone()),
        _ => None,
    })
    .unwrap();

    let db = DbState::new(memory_pool().await);
    build_app(&config, AppState::new(db, UploadStore::new(&config.upload_dir)))
}

#[tokio::test]
async fn test_serves_uploaded_files() {
    let public = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();
    std::fs::write(uploads.path().join("123-456.png"), b"image").unwrap();

    let app = app_with_dirs(public.path(), uploads.path()).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/uploads/123-456.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"image");
}

#[tokio::test]
async fn test_public_fallback_and_missing_files() {
    let public = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();
    std::fs::write(public.path().join("index.html"), "<h1>posts</h1>").unwrap();

    let app = app_with_dirs(public.path(), uploads.path()).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/nope.txt").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_routes_and_cors() {
    let public = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();
    let app = app_with_dirs(public.path(), uploads.path()).await;

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/tags")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"[]");
}
