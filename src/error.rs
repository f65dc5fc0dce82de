use thiserror::Error;

/// Errors raised by the storage directory.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No file with this name exists in the storage directory
    #[error("File does not exist: {0}")]
    NotFound(String),

    /// Name is not a bare file name (contains separators, `..`, NUL, or is empty)
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    /// A file with the generated name is already present
    #[error("File already exists: {0}")]
    AlreadyExists(String),

    /// Any other filesystem failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// Map a `std::io::Error` for `filename`, keeping not-found distinct.
    pub fn from_io(err: std::io::Error, filename: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(filename.to_string()),
            std::io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(filename.to_string()),
            _ => StoreError::Io(format!("{}: {}", filename, err)),
        }
    }
}

/// Errors that can occur while accepting an upload.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// The request carried no file under the expected field
    #[error("Please select an image file to upload")]
    MissingFile,

    /// Extension or declared MIME type is outside the allow-list
    #[error("Only image files may be uploaded")]
    InvalidType {
        filename: String,
        content_type: String,
    },

    /// A single file exceeded the per-file size ceiling
    #[error("File size exceeds the limit (max {})", format_limit(.limit))]
    SizeLimitExceeded { limit: u64 },

    /// More files than the endpoint accepts
    #[error("Too many files: at most {max} per request")]
    TooManyFiles { max: usize },

    /// A file was sent under a field name the endpoint does not read
    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    /// The multipart body could not be parsed
    #[error("Malformed multipart request: {0}")]
    Multipart(String),

    /// Writing to the storage directory failed
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Render a byte limit the way users expect to read it ("10 MB", "512 KB").
fn format_limit(limit: &u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if *limit >= MB && limit % MB == 0 {
        format!("{} MB", limit / MB)
    } else if *limit >= KB && limit % KB == 0 {
        format!("{} KB", limit / KB)
    } else {
        format!("{} bytes", limit)
    }
}
