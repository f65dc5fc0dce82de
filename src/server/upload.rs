//! Multipart collection for the upload endpoints.
//!
//! Files are read field by field. Each file is checked against the allow-list
//! as soon as its headers arrive and its size is enforced chunk by chunk, so an
//! oversized or disallowed file is rejected before anything touches the
//! storage directory.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::BytesMut;
use tracing::debug;

use crate::error::UploadError;
use crate::storage::{check_size, validate_upload, PendingUpload};

/// Limits applied while collecting files from one request.
#[derive(Debug, Clone, Copy)]
pub struct CollectLimits {
    /// Maximum number of files accepted under the field
    pub max_files: usize,

    /// Maximum size of a single file in bytes
    pub max_file_size: u64,
}

/// Read every file sent under `field_name`, in submission order.
///
/// Text fields are ignored. File fields with an empty filename (an empty
/// `<input type="file">`) are skipped. A file under any other field name,
/// more than `limits.max_files` files, a disallowed type or an oversized file
/// all fail the whole request.
pub async fn collect_files(
    mut multipart: Multipart,
    field_name: &str,
    limits: CollectLimits,
) -> Result<Vec<PendingUpload>, UploadError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limits.max_file_size))?
    {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        if original_name.is_empty() {
            continue;
        }

        let name = field.name().unwrap_or_default().to_string();
        if name != field_name {
            return Err(UploadError::UnexpectedField(name));
        }

        if files.len() >= limits.max_files {
            return Err(UploadError::TooManyFiles {
                max: limits.max_files,
            });
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        validate_upload(&original_name, &content_type)?;

        let data = read_limited(field, limits.max_file_size).await?;

        debug!(
            field = %name,
            original_name = %original_name,
            content_type = %content_type,
            size = data.len(),
            "Received file"
        );

        files.push(PendingUpload {
            original_name,
            content_type,
            data: data.freeze(),
        });
    }

    Ok(files)
}

/// Read a field's body, failing once it grows past `limit` bytes.
async fn read_limited(mut field: Field<'_>, limit: u64) -> Result<BytesMut, UploadError> {
    let mut data = BytesMut::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        check_size((data.len() + chunk.len()) as u64, limit)?;
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}

/// Body-limit rejections from the transport become `SizeLimitExceeded`;
/// anything else is a malformed request.
fn multipart_error(err: MultipartError, limit: u64) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::SizeLimitExceeded { limit }
    } else {
        UploadError::Multipart(err.body_text())
    }
}
