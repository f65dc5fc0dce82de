//! HTTP request handlers for the image hosting API.
//!
//! # Endpoints
//!
//! - `POST /upload` - Upload one image (field `image`)
//! - `POST /upload-multiple` - Upload several images (field `images`)
//! - `GET /images` - List stored images
//! - `DELETE /images/{filename}` - Delete a stored image
//! - `GET /health` - Health check
//! - `GET /` - Endpoint catalog
//! - `GET /ui` - Bundled upload page

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::PathRejection, FromRequestParts, Multipart,
        Path, State,
    },
    http::{header, request::Parts, StatusCode},
    response::{Html, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{StoreError, UploadError};
use crate::storage::{ImageStore, PendingUpload, StoredImage};

use super::response::{error_response, ApiResponse, DeleteError, ListError, MessageResponse};
use super::upload::{collect_files, CollectLimits};

/// Multipart field read by `POST /upload`.
pub const SINGLE_UPLOAD_FIELD: &str = "image";

/// Multipart field read by `POST /upload-multiple`.
pub const MULTI_UPLOAD_FIELD: &str = "images";

/// A body that is not `multipart/form-data` carries no file.
fn not_multipart(rejection: MultipartRejection) -> UploadError {
    debug!(reason = %rejection.body_text(), "Upload request is not multipart");
    UploadError::MissingFile
}

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the image store and upload limits.
///
/// This is passed to all handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// The storage directory
    pub store: Arc<ImageStore>,

    /// Maximum size of a single uploaded file in bytes
    pub max_file_size: u64,

    /// Maximum number of files per multi-upload request
    pub max_files: usize,
}

impl AppState {
    /// Create application state over `store` with the given limits.
    pub fn new(store: ImageStore, max_file_size: u64, max_files: usize) -> Self {
        Self {
            store: Arc::new(store),
            max_file_size,
            max_files,
        }
    }

    fn limits(&self, max_files: usize) -> CollectLimits {
        CollectLimits {
            max_files,
            max_file_size: self.max_file_size,
        }
    }
}

// =============================================================================
// Base URL
// =============================================================================

/// `{scheme}://{host}` of the current request.
///
/// The host comes from the `Host` header (or the request URI authority for
/// HTTP/2), the scheme from `X-Forwarded-Proto` when a reverse proxy sets it,
/// otherwise `http`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

impl BaseUrl {
    /// Public URL of a stored file.
    pub fn image_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.0, urlencoding::encode(filename))
    }
}

impl<S> FromRequestParts<S> for BaseUrl
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());

        let proto = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.split(',').next())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("http");

        Ok(BaseUrl(format!("{}://{}", proto, host)))
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// A freshly uploaded image.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    /// Generated name inside the storage directory
    pub filename: String,

    /// Name the client gave the file
    pub original_name: String,

    /// Size in bytes
    pub size: u64,

    /// Public URL of the stored file
    pub url: String,
}

/// An entry of the image listing.
#[derive(Debug, Serialize)]
pub struct ImageEntry {
    /// Name inside the storage directory
    pub filename: String,

    /// Public URL of the stored file
    pub url: String,

    /// Size in bytes, read at request time
    pub size: u64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always true when the service answers
    pub success: bool,

    /// Service status
    pub message: String,

    /// Current time, RFC 3339 in UTC
    pub timestamp: String,
}

/// Endpoint catalog returned by `GET /`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    /// Always true
    pub success: bool,

    /// Service name
    pub message: String,

    /// Route → description
    pub endpoints: BTreeMap<&'static str, &'static str>,

    /// `{scheme}://{host}` of the request
    pub base_url: String,
}

fn uploaded(base_url: &BaseUrl, pending: &PendingUpload, stored: StoredImage) -> UploadedImage {
    UploadedImage {
        url: base_url.image_url(&stored.filename),
        filename: stored.filename,
        original_name: pending.original_name.clone(),
        size: stored.size,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle single-image uploads.
///
/// # Endpoint
///
/// `POST /upload` with a multipart body carrying one file in field `image`.
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "success": true,
///   "message": "Image uploaded successfully",
///   "data": {
///     "filename": "1700000000000-123456789.png",
///     "originalName": "cat.png",
///     "size": 512000,
///     "url": "http://localhost:3000/uploads/1700000000000-123456789.png"
///   }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: No file, not an image, file too large, or a second file
/// - `500 Internal Server Error`: Storage failure
pub async fn upload_handler(
    State(state): State<AppState>,
    base_url: BaseUrl,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<UploadedImage>>, UploadError> {
    let multipart = multipart.map_err(not_multipart)?;

    let files = collect_files(multipart, SINGLE_UPLOAD_FIELD, state.limits(1)).await?;
    let Some(pending) = files.into_iter().next() else {
        return Err(UploadError::MissingFile);
    };

    let stored = state.store.save(&pending.original_name, &pending.data).await?;

    info!(
        filename = %stored.filename,
        original_name = %pending.original_name,
        size = stored.size,
        "Image uploaded"
    );

    Ok(Json(ApiResponse::with_message(
        "Image uploaded successfully",
        uploaded(&base_url, &pending, stored),
    )))
}

/// Handle multi-image uploads.
///
/// # Endpoint
///
/// `POST /upload-multiple` with up to `max_files` files in field `images`.
///
/// Every file is validated before any is written. If any file is rejected,
/// nothing is stored.
///
/// # Response
///
/// `200 OK` with `data` listing the stored files in submission order.
///
/// # Errors
///
/// - `400 Bad Request`: No files, too many files, not an image, or too large
/// - `500 Internal Server Error`: Storage failure
pub async fn upload_multiple_handler(
    State(state): State<AppState>,
    base_url: BaseUrl,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<Vec<UploadedImage>>>, UploadError> {
    let multipart = multipart.map_err(not_multipart)?;

    let files = collect_files(multipart, MULTI_UPLOAD_FIELD, state.limits(state.max_files)).await?;
    if files.is_empty() {
        return Err(UploadError::MissingFile);
    }

    let stored = state.store.save_all(&files).await?;

    let images: Vec<UploadedImage> = files
        .iter()
        .zip(stored)
        .map(|(pending, stored)| uploaded(&base_url, pending, stored))
        .collect();

    info!(count = images.len(), "Images uploaded");

    Ok(Json(ApiResponse::with_message(
        format!("Successfully uploaded {} images", images.len()),
        images,
    )))
}

/// Handle image list requests.
///
/// # Endpoint
///
/// `GET /images`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "filename": "1700000000000-1.png", "url": "http://host/uploads/1700000000000-1.png", "size": 1024 }
///   ]
/// }
/// ```
///
/// Entries come in filesystem order. Sizes are read on every request.
pub async fn list_handler(
    State(state): State<AppState>,
    base_url: BaseUrl,
) -> Result<Json<ApiResponse<Vec<ImageEntry>>>, ListError> {
    let images = state.store.list().await?;

    let entries = images
        .into_iter()
        .map(|image| ImageEntry {
            url: base_url.image_url(&image.filename),
            filename: image.filename,
            size: image.size,
        })
        .collect();

    Ok(Json(ApiResponse::data(entries)))
}

/// Handle image deletion.
///
/// # Endpoint
///
/// `DELETE /images/{filename}`
///
/// # Errors
///
/// - `400 Bad Request`: `filename` is not a bare file name or not valid UTF-8
/// - `404 Not Found`: No such file
/// - `500 Internal Server Error`: Filesystem failure
pub async fn delete_handler(
    State(state): State<AppState>,
    filename: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, DeleteError> {
    let Path(filename) =
        filename.map_err(|e| DeleteError(StoreError::InvalidName(e.body_text())))?;

    state.store.delete(&filename).await?;

    info!(filename = %filename, "Image deleted");

    Ok(Json(MessageResponse::ok("File deleted successfully")))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "success": true,
///   "message": "Image hosting service is running",
///   "timestamp": "2024-01-01T00:00:00.000Z"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Image hosting service is running".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
}

/// Handle discovery requests with a static catalog of endpoints.
pub async fn discovery_handler(base_url: BaseUrl) -> Json<DiscoveryResponse> {
    let endpoints = BTreeMap::from([
        ("POST /upload", "Upload a single image (field: image)"),
        (
            "POST /upload-multiple",
            "Upload multiple images (field: images)",
        ),
        ("GET /images", "List all images"),
        ("DELETE /images/{filename}", "Delete an image"),
        ("GET /uploads/{filename}", "Fetch an uploaded image"),
        ("GET /health", "Health check"),
        ("GET /ui", "Upload page"),
    ]);

    Json(DiscoveryResponse {
        success: true,
        message: "Image hosting service API".to_string(),
        endpoints,
        base_url: base_url.0,
    })
}

/// Serve the bundled upload page.
pub async fn client_handler(State(state): State<AppState>, base_url: BaseUrl) -> Html<String> {
    Html(super::client::generate_client_html(
        &base_url.0,
        state.max_file_size,
        state.max_files,
    ))
}

/// JSON 404 for routes that match nothing.
pub async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", None)
}

/// JSON 405 for known paths requested with an unsupported method.
pub async fn method_not_allowed_handler() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
}

// =============================================================================
// Tests
// =============================================================================
