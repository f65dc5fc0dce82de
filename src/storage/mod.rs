//! Storage layer for uploaded images.
//!
//! All durable state lives in a single directory on the local filesystem.
//! There is no index or metadata file: the directory listing is the data model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │  PendingUpload
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │               validation                │
//! │   (extension + MIME allow-list, size)   │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │               ImageStore                │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │    naming    │  │  tokio::fs      │  │
//! │  │ (millis-rand │  │  (create/list/  │  │
//! │  │  .ext)       │  │   delete)       │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`ImageStore`]: The storage directory and its create/list/delete operations
//! - [`generate_filename`]: Collision-resistant name generation without lookups
//! - [`validate_upload`]: Allow-list check on declared name and MIME type
//! - [`PendingUpload`]: A received file that has not been written yet
//! - [`StoredImage`]: A file present in the storage directory

mod naming;
mod store;
mod validation;

pub use naming::{extension_of, generate_filename, MAX_RANDOM_SUFFIX};
pub use store::{ImageStore, PendingUpload, StoredImage};
pub use validation::{
    check_size, is_allowed_extension, is_allowed_mime, validate_upload, ALLOWED_TYPES,
    DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE,
};
