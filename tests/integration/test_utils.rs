//! Test utilities for integration tests.
//!
//! This module provides a router backed by a temporary storage directory, a
//! small multipart body builder and response helpers.

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;

use imghost::{create_router, ImageStore, RouterConfig};

/// Host header sent with every test request.
pub const TEST_HOST: &str = "localhost:3000";

// =============================================================================
// Test App
// =============================================================================

/// A router over a fresh temporary storage directory.
pub struct TestApp {
    pub router: Router,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(RouterConfig::default().with_tracing(false)).await
    }

    pub async fn with_config(config: RouterConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");
        let store = ImageStore::open(&upload_dir).await.unwrap();

        Self {
            router: create_router(store, config),
            upload_dir,
            _dir: dir,
        }
    }

    /// Send a request through a clone of the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::ServiceExt;
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Names of every file in the storage directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        list_dir(&self.upload_dir)
    }

    /// Put a file into the storage directory behind the service's back.
    pub fn place_file(&self, name: &str, data: &[u8]) {
        std::fs::write(self.upload_dir.join(name), data).unwrap();
    }
}

pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Multipart Builder
// =============================================================================

const BOUNDARY: &str = "----imghost-test-boundary-7MA4YWxkTrZu0gW";

/// Builds `multipart/form-data` bodies by hand.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file part.
    pub fn file(mut self, field: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, filename
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Add a plain text part.
    pub fn text(mut self, field: &str, value: &str) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Finish the body and wrap it in a POST request to `uri`.
    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header("host", TEST_HOST)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

// =============================================================================
// Request / Response Helpers
// =============================================================================

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", TEST_HOST)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("host", TEST_HOST)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// Deterministic pseudo-image content of `len` bytes.
pub fn image_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}
