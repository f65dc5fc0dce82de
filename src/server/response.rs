//! Response envelope and error mapping.
//!
//! Every endpoint answers with the same JSON shape:
//!
//! ```json
//! { "success": true, "message": "...", "data": { ... } }
//! { "success": false, "message": "...", "error": "..." }
//! ```
//!
//! Errors are converted to this envelope exactly once, at the handler
//! boundary, through the `IntoResponse` impls below.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::{StoreError, UploadError};

// =============================================================================
// Envelope
// =============================================================================

/// Uniform JSON response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request succeeded
    pub success: bool,

    /// Human-readable summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Endpoint-specific payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Underlying error detail for server-side failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An envelope that never carries data.
pub type MessageResponse = ApiResponse<()>;

impl<T: Serialize> ApiResponse<T> {
    /// A successful response carrying only `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// A successful response carrying a message and `data`.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl MessageResponse {
    /// A successful response with only a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// A failed response.
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error,
        }
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Build an error envelope and log it according to severity.
///
/// - 5xx errors are logged at ERROR level
/// - 404s at DEBUG level (common and expected)
/// - other 4xx at WARN level
pub fn error_response(
    status: StatusCode,
    message: impl Into<String>,
    detail: Option<String>,
) -> Response {
    let message = message.into();

    if status.is_server_error() {
        error!(
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or(""),
            "Server error: {}",
            message
        );
    } else if status == StatusCode::NOT_FOUND {
        debug!(status = status.as_u16(), "Not found: {}", message);
    } else {
        warn!(status = status.as_u16(), "Client error: {}", message);
    }

    (status, Json(MessageResponse::failure(message, detail))).into_response()
}

/// Generic message for failed uploads.
pub const UPLOAD_FAILED: &str = "Upload failed";

/// Generic message for failed listings.
pub const LIST_FAILED: &str = "Failed to list images";

/// Generic message for failed deletions.
pub const DELETE_FAILED: &str = "Failed to delete file";

/// Convert UploadError to HTTP response.
///
/// Validation problems (missing file, wrong type, size, field misuse,
/// malformed body) are client errors and answer 400 with the error's own
/// message. Storage failures answer 500 with the detail in `error`.
impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match &self {
            UploadError::MissingFile
            | UploadError::InvalidType { .. }
            | UploadError::SizeLimitExceeded { .. }
            | UploadError::TooManyFiles { .. }
            | UploadError::UnexpectedField(_)
            | UploadError::Multipart(_) => {
                error_response(StatusCode::BAD_REQUEST, self.to_string(), None)
            }

            UploadError::Store(StoreError::InvalidName(_)) => {
                error_response(StatusCode::BAD_REQUEST, self.to_string(), None)
            }

            UploadError::Store(store_err) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                UPLOAD_FAILED,
                Some(store_err.to_string()),
            ),
        }
    }
}

/// Wrapper for listing errors to implement IntoResponse.
pub struct ListError(pub StoreError);

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            LIST_FAILED,
            Some(self.0.to_string()),
        )
    }
}

impl From<StoreError> for ListError {
    fn from(err: StoreError) -> Self {
        ListError(err)
    }
}

/// Wrapper for deletion errors to implement IntoResponse.
pub struct DeleteError(pub StoreError);

impl IntoResponse for DeleteError {
    fn into_response(self) -> Response {
        match &self.0 {
            StoreError::NotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "File does not exist", None)
            }
            StoreError::InvalidName(_) => {
                error_response(StatusCode::BAD_REQUEST, self.0.to_string(), None)
            }
            StoreError::AlreadyExists(_) | StoreError::Io(_) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                DELETE_FAILED,
                Some(self.0.to_string()),
            ),
        }
    }
}

impl From<StoreError> for DeleteError {
    fn from(err: StoreError) -> Self {
        DeleteError(err)
    }
}

// =============================================================================
// Tests
// =============================================================================
