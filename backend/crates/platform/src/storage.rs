//! Media Storage
//!
//! Capability interface for storing uploaded media and resolving stored
//! handles to public URLs. The feed crate depends only on the trait, so the
//! disk backend can be swapped for an object store per deployment.

use std::path::PathBuf;

use thiserror::Error;

/// Maximum upload size (50 MB, covers short videos)
pub const MAX_MEDIA_BYTES: usize = 50 * 1024 * 1024;

/// MIME types accepted for post media (images and videos)
pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/quicktime",
    "video/x-msvideo",
    "video/x-matroska",
    "video/webm",
    "video/3gpp",
    "video/3gpp2",
    "video/mpeg",
    "video/ogg",
];

/// Check whether a content type is on the media allow-list
pub fn is_allowed_media_type(content_type: &str) -> bool {
    ALLOWED_MEDIA_TYPES.contains(&content_type)
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Content type not on the allow-list
    #[error("Invalid file type '{0}'. Only images and videos are allowed")]
    UnsupportedMediaType(String),

    /// Upload exceeds the size limit
    #[error("File too large ({actual} bytes, maximum {max})")]
    TooLarge { max: usize, actual: usize },

    /// Handle contains path separators or traversal components
    #[error("Invalid media handle")]
    InvalidHandle,

    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An upload received from a client, held in memory until stored
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A stored media object. The handle is opaque to callers; only the
/// storage backend can resolve or delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub handle: String,
}

/// Media storage capability
#[trait_variant::make(MediaStorage: Send)]
pub trait LocalMediaStorage {
    /// Persist an upload, returning its storage handle
    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, StorageError>;

    /// Delete a stored object by handle
    async fn delete(&self, handle: &str) -> Result<(), StorageError>;

    /// Resolve a handle to a fully-qualified public URL
    fn public_url(&self, handle: &str) -> String;
}

// ============================================================================
// Local disk backend
// ============================================================================

/// Local-disk media storage, served as static files under `/uploads/`
#[derive(Debug, Clone)]
pub struct DiskMediaStorage {
    root: PathBuf,
    public_base: String,
    max_bytes: usize,
}

impl DiskMediaStorage {
    /// Create a disk storage rooted at `root`, resolving URLs against
    /// `public_base` (scheme + host, no trailing slash)
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        let public_base = public_base.into().trim_end_matches('/').to_string();
        Self {
            root: root.into(),
            public_base,
            max_bytes: MAX_MEDIA_BYTES,
        }
    }

    /// Override the upload size limit
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn object_path(&self, handle: &str) -> Result<PathBuf, StorageError> {
        if handle.is_empty()
            || handle.contains('/')
            || handle.contains('\\')
            || handle.contains("..")
        {
            return Err(StorageError::InvalidHandle);
        }
        Ok(self.root.join(handle))
    }
}

impl MediaStorage for DiskMediaStorage {
    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, StorageError> {
        if !is_allowed_media_type(&upload.content_type) {
            return Err(StorageError::UnsupportedMediaType(upload.content_type));
        }

        if upload.bytes.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                max: self.max_bytes,
                actual: upload.bytes.len(),
            });
        }

        let handle = format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            sanitize_file_name(&upload.file_name)
        );

        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.object_path(&handle)?;
        tokio::fs::write(&path, &upload.bytes).await?;

        tracing::debug!(handle = %handle, bytes = upload.bytes.len(), "Stored media object");

        Ok(StoredMedia { handle })
    }

    async fn delete(&self, handle: &str) -> Result<(), StorageError> {
        let path = self.object_path(handle)?;
        tokio::fs::remove_file(&path).await?;

        tracing::debug!(handle = %handle, "Deleted media object");

        Ok(())
    }

    fn public_url(&self, handle: &str) -> String {
        format!("{}/uploads/{}", self.public_base, handle)
    }
}

/// Reduce a client-supplied file name to a safe handle component
fn sanitize_file_name(name: &str) -> String {
    // Keep only the final path component, then strip anything unusual
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
