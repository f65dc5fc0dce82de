//! Upload validation against the image allow-list.
//!
//! The check trusts the client-declared MIME type; it does not sniff content.

use std::path::Path;

use crate::error::UploadError;

/// File types accepted for upload and shown in listings.
pub const ALLOWED_TYPES: [&str; 6] = ["jpeg", "jpg", "png", "gif", "webp", "bmp"];

/// Default per-file size ceiling (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default number of files accepted by the multi-file endpoint.
pub const DEFAULT_MAX_FILES: usize = 10;

/// Whether `name` has an allow-listed extension (case-insensitive).
pub fn is_allowed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_TYPES.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Whether a declared MIME type names one of the allowed image types.
///
/// Matching is by token containment, so `image/png` and `image/x-ms-bmp`
/// both pass while `application/pdf` does not.
pub fn is_allowed_mime(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    ALLOWED_TYPES.iter().any(|t| content_type.contains(t))
}

/// Accept a file iff both its extension and its declared MIME type are allowed.
pub fn validate_upload(original_name: &str, content_type: &str) -> Result<(), UploadError> {
    if is_allowed_extension(original_name) && is_allowed_mime(content_type) {
        Ok(())
    } else {
        Err(UploadError::InvalidType {
            filename: original_name.to_string(),
            content_type: content_type.to_string(),
        })
    }
}

/// Reject sizes strictly above `limit`; exactly `limit` bytes is accepted.
pub fn check_size(size: u64, limit: u64) -> Result<(), UploadError> {
    if size > limit {
        Err(UploadError::SizeLimitExceeded { limit })
    } else {
        Ok(())
    }
}
