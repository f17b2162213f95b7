/// Object storage for property attachments
///
/// [`ObjectStorage`] is the seam between the attachment service and the
/// bucket. [`S3Storage`] talks to any S3-compatible endpoint; [`MemoryStorage`]
/// keeps objects in process for tests and local runs.
///
/// # Keys
///
/// Attachments are stored under `property/<property_id>/attachments/<filename>`
/// (see [`attachment_key`]).

use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod memory;
pub mod s3;

pub use memory::MemoryStorage;
pub use s3::S3Storage;

/// Storage result type alias
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by object storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to upload {key}: {message}")]
    Upload { key: String, message: String },

    #[error("Failed to download {key}: {message}")]
    Download { key: String, message: String },

    #[error("Failed to delete {key}: {message}")]
    Delete { key: String, message: String },

    #[error("Object store returned no ETag for {0}")]
    MissingETag(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    /// Entity tag without surrounding quotes
    pub etag: String,

    /// Uploaded size in bytes
    pub size: i64,
}

/// An S3-like object store
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads a local file under `key`
    ///
    /// `is_public` requests a world-readable object where the backend
    /// supports ACLs.
    async fn upload_file(&self, local_path: &Path, key: &str, is_public: bool) -> StorageResult<UploadedObject>;

    /// Downloads `key` into a fresh temporary file named after `filename`
    ///
    /// The caller owns the returned path and is responsible for removing it.
    async fn download_temp_file(&self, key: &str, filename: &str) -> StorageResult<PathBuf>;

    /// Removes `key`
    async fn delete_object(&self, key: &str) -> StorageResult<()>;
}

/// Storage key for a property attachment
pub fn attachment_key(property_id: i64, filename: &str) -> String {
    format!("property/{}/attachments/{}", property_id, filename)
}

/// Reduces a client-supplied filename to its final path component
///
/// Both `/` and `\` count as separators. Returns `None` when nothing usable
/// remains (empty, `.` or `..`).
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match name {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

/// Strips the quotes S3 puts around ETags
pub(crate) fn normalize_etag(etag: &str) -> String {
    etag.trim().trim_matches('"').to_string()
}

/// Path for a temporary copy of `filename` inside `dir`
///
/// A random prefix keeps concurrent requests for the same name apart.
pub(crate) fn scratch_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(format!("{}-{}", uuid::Uuid::new_v4(), filename))
}
