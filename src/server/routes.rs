//! Router configuration for the image hosting service.
//!
//! This module defines the HTTP routes and applies middleware for body limits,
//! CORS and request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /                          - Endpoint catalog
//! /health                    - Health check
//! /ui                        - Bundled upload page
//! /upload                    - Single upload (POST)
//! /upload-multiple           - Multi upload (POST)
//! /images                    - List images (GET)
//! /images/{filename}         - Delete image (DELETE)
//! /uploads/{filename}        - Stored files, served from disk
//! everything else            - Public directory, if configured, else JSON 404
//! ```
//!
//! # Example
//!
//! ```ignore
//! use imghost::server::routes::{create_router, RouterConfig};
//! use imghost::storage::ImageStore;
//!
//! let store = ImageStore::open("uploads").await?;
//! let router = create_router(store, RouterConfig::default().with_public_dir("public"));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{delete, get, post},
    Router,
};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    client_handler, delete_handler, discovery_handler, health_handler, list_handler,
    method_not_allowed_handler, not_found_handler, upload_handler, upload_multiple_handler,
    AppState,
};
use crate::storage::{ImageStore, DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE};

/// Room left in the request body limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Maximum size of a single uploaded file in bytes
    pub max_file_size: u64,

    /// Maximum number of files per multi-upload request
    pub max_files: usize,

    /// Directory of static client assets served as a fallback
    pub public_dir: Option<PathBuf>,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    /// Defaults:
    /// - 10 MiB per file, 10 files per multi-upload
    /// - No public directory
    /// - CORS allows any origin
    /// - Tracing is enabled
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            public_dir: None,
            cors_origins: None,
            enable_tracing: true,
        }
    }
}

impl RouterConfig {
    /// Set the per-file size limit in bytes.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Set the maximum number of files per multi-upload.
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Serve static assets from `dir` for paths no route claims.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    /// Request body limit large enough for a full multi-upload.
    ///
    /// Per-file limits are enforced while reading each field; this only bounds
    /// the whole body.
    pub fn body_limit(&self) -> usize {
        let files = self.max_files.max(1) as u64;
        let limit = self
            .max_file_size
            .saturating_mul(files)
            .saturating_add(MULTIPART_OVERHEAD);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `store` - The storage directory uploads are written to and served from
/// * `config` - Router configuration
///
/// # Returns
///
/// A configured Axum router ready to be served.
pub fn create_router(store: ImageStore, config: RouterConfig) -> Router {
    let uploads = ServeDir::new(store.root()).append_index_html_on_directories(false);
    let app_state = AppState::new(store, config.max_file_size, config.max_files);

    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/", get(discovery_handler))
        .route("/health", get(health_handler))
        .route("/ui", get(client_handler))
        .route("/upload", post(upload_handler))
        .route("/upload-multiple", post(upload_multiple_handler))
        .route("/images", get(list_handler))
        .route("/images/{filename}", delete(delete_handler))
        .nest_service("/uploads", uploads)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(DefaultBodyLimit::max(config.body_limit()))
        .with_state(app_state);

    // Paths no route claims go to the public directory when it exists
    let router = match config.public_dir.as_ref().filter(|dir| dir.is_dir()) {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).not_found_service(not_found_handler.into_service()),
        ),
        None => router.fallback(not_found_handler),
    };

    let router = router.layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
