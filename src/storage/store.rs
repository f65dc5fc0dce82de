//! The storage directory.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::StoreError;

use super::naming::generate_filename;
use super::validation::is_allowed_extension;

/// A received file that has passed validation but is not on disk yet.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    /// Name the client gave the file (informational only)
    pub original_name: String,

    /// MIME type declared by the client
    pub content_type: String,

    /// File contents
    pub data: Bytes,
}

/// A file present in the storage directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Name of the file inside the storage directory
    pub filename: String,

    /// Size in bytes as reported by the filesystem
    pub size: u64,
}

/// A single directory holding every uploaded image.
///
/// The store holds no in-memory state besides its root path, so it can be
/// shared freely between request handlers.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Open the store at `root`, creating the directory if it does not exist.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", root.display(), e)))?;

        Ok(Self { root })
    }

    /// The storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a bare file name to its path inside the storage directory.
    ///
    /// Names containing path separators, parent-directory components or NUL
    /// bytes are refused so a caller can never address a file outside the root.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, StoreError> {
        let is_bare = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(['/', '\\', '\0']);

        if !is_bare {
            return Err(StoreError::InvalidName(filename.to_string()));
        }

        Ok(self.root.join(filename))
    }

    /// Write `data` under a freshly generated name derived from `original_name`.
    ///
    /// The file is created with `create_new`, so a name collision fails instead
    /// of overwriting an existing image. A partially written file is removed.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredImage, StoreError> {
        self.write_new(generate_filename(original_name), data).await
    }

    async fn write_new(&self, filename: String, data: &[u8]) -> Result<StoredImage, StoreError> {
        let path = self.resolve(&filename)?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| StoreError::from_io(e, &filename))?;

        let written = async {
            file.write_all(data).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            let _ = tokio::fs::remove_file(&path).await;
            return Err(StoreError::from_io(e, &filename));
        }

        debug!(filename = %filename, size = data.len(), "Stored upload");

        Ok(StoredImage {
            filename,
            size: data.len() as u64,
        })
    }

    /// Write every upload, or none of them.
    ///
    /// Results are returned in input order. If any write fails, files already
    /// written by this call are removed before the error is returned.
    pub async fn save_all(&self, uploads: &[PendingUpload]) -> Result<Vec<StoredImage>, StoreError> {
        self.save_all_named(uploads, generate_filename).await
    }

    async fn save_all_named<F>(
        &self,
        uploads: &[PendingUpload],
        mut name_for: F,
    ) -> Result<Vec<StoredImage>, StoreError>
    where
        F: FnMut(&str) -> String,
    {
        let mut stored = Vec::with_capacity(uploads.len());

        for upload in uploads {
            let filename = name_for(&upload.original_name);
            match self.write_new(filename, &upload.data).await {
                Ok(image) => stored.push(image),
                Err(err) => {
                    for image in &stored {
                        if let Err(e) = self.delete(&image.filename).await {
                            warn!(filename = %image.filename, error = %e, "Rollback failed");
                        }
                    }
                    return Err(err);
                }
            }
        }

        Ok(stored)
    }

    /// List image files in the directory with their current sizes.
    ///
    /// Only regular files with an allow-listed extension are returned. Order is
    /// whatever the filesystem enumerates. Entries removed between enumeration
    /// and stat are skipped.
    pub async fn list(&self) -> Result<Vec<StoredImage>, StoreError> {
        let root = self.root.display().to_string();
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", root, e)))?;

        let mut images = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", root, e)))?
        {
            let Ok(filename) = entry.file_name().into_string() else {
                continue;
            };

            if !is_allowed_extension(&filename) {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::from_io(e, &filename)),
            };

            if metadata.is_file() {
                images.push(StoredImage {
                    filename,
                    size: metadata.len(),
                });
            }
        }

        Ok(images)
    }

    /// Remove `filename` from the directory.
    pub async fn delete(&self, filename: &str) -> Result<(), StoreError> {
        let path = self.resolve(filename)?;

        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| StoreError::from_io(e, filename))?;

        debug!(filename = %filename, "Deleted image");
        Ok(())
    }
}
