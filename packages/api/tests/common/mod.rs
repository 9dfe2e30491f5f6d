// ABOUTME: Shared helpers for API integration tests
// ABOUTME: Builds a router over an in-memory database and issues one-shot requests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use postboard_api::{create_router, AppState, DbState, UploadStore};
use postboard_storage::test_utils::memory_pool;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "postboard-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub db: DbState,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = memory_pool().await;
        let db = DbState::new(pool);
        let upload_dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(upload_dir.path());
        let router = create_router(AppState::new(db.clone(), uploads));

        Self {
            router,
            db,
            upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub async fn multipart(&self, uri: &str, form: MultipartForm) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(form.finish()))
                .unwrap(),
        )
        .await
    }
}

/// Minimal multipart/form-data body builder
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, filename, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }
}

pub fn post_form(id: &str) -> MultipartForm {
    MultipartForm::new()
        .text("id", id)
        .text("title", "Full house battery backup")
        .text("date", "2023-01-06 16:45")
        .text("description", "Improve your reading skills")
}
