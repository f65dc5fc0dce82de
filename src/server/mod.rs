//! HTTP server layer for imghost.
//!
//! This module provides the HTTP API for uploading, listing, deleting and
//! serving images.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │      POST /upload   GET /images   DELETE /images/{filename}     │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │   upload    │  │        routes           │  │
//! │  │ (requests)  │  │ (multipart) │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! │  ┌─────────────┐  ┌─────────────┐                               │
//! │  │  response   │  │   client    │                               │
//! │  │ (envelope)  │  │ (HTML page) │                               │
//! │  └─────────────┘  └─────────────┘                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod upload;

pub use handlers::{
    client_handler, delete_handler, discovery_handler, health_handler, list_handler,
    method_not_allowed_handler, not_found_handler, upload_handler, upload_multiple_handler,
    AppState, BaseUrl, DiscoveryResponse, HealthResponse, ImageEntry, UploadedImage,
    MULTI_UPLOAD_FIELD, SINGLE_UPLOAD_FIELD,
};
pub use response::{ApiResponse, DeleteError, ListError, MessageResponse};
pub use routes::{create_router, RouterConfig};
pub use upload::{collect_files, CollectLimits};
