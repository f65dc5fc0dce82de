//! # imghost
//!
//! A minimal image hosting server.
//!
//! Clients upload one or more image files over HTTP; the service stores them
//! in a local directory under generated unique names and serves them back from
//! static URLs. The directory listing is the only data model: there is no
//! database and no index file.
//!
//! ## Features
//!
//! - **Uploads**: Single (`POST /upload`) and multi-file (`POST /upload-multiple`)
//! - **Validation**: Extension and MIME allow-list, per-file size ceiling
//! - **Management**: List (`GET /images`) and delete (`DELETE /images/{filename}`)
//! - **Static serving**: Stored files under `/uploads/`, optional public directory
//! - **Uniform envelope**: Every JSON answer is `{success, message, data | error}`
//!
//! ## Architecture
//!
//! - [`storage`] - Storage directory, filename generation and validation
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error taxonomy
//!
//! ## Example
//!
//! ```rust,no_run
//! use imghost::{create_router, ImageStore, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = ImageStore::open("uploads").await.unwrap();
//!     let router = create_router(store, RouterConfig::default());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{StoreError, UploadError};
pub use server::{
    create_router, ApiResponse, AppState, BaseUrl, ImageEntry, MessageResponse, RouterConfig,
    UploadedImage,
};
pub use storage::{
    generate_filename, validate_upload, ImageStore, PendingUpload, StoredImage, ALLOWED_TYPES,
    DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE,
};
