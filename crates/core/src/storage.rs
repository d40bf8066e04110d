//! Object storage for listing images, kept on the local filesystem and
//! served back under `/storage/<bucket>/<name>`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Bucket holding listing photos.
pub const PROPERTY_IMAGES: &str = "property-images";

/// Default upload ceiling: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const RANDOM_PART_LEN: usize = 13;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("only image files are accepted (got {0})")]
    NotAnImage(String),
    #[error("image is {size} bytes, the limit is {max}")]
    TooLarge { size: usize, max: usize },
    #[error("upload is empty")]
    Empty,
    #[error("invalid object name: {0}")]
    InvalidName(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check an upload before it is written.
pub fn validate_upload(content_type: &str, size: usize, max: usize) -> Result<(), StorageError> {
    if !content_type.starts_with("image/") {
        return Err(StorageError::NotAnImage(content_type.to_string()));
    }
    if size == 0 {
        return Err(StorageError::Empty);
    }
    if size > max {
        return Err(StorageError::TooLarge { size, max });
    }
    Ok(())
}

/// Generate a unique object name `<random>_<unix millis>.<ext>`.
///
/// The extension is whatever follows the last `.` of the uploaded file
/// name (the whole name when there is none), reduced to ASCII
/// alphanumerics and lowercased.
pub fn object_name(original: &str, now: DateTime<Utc>) -> String {
    let random: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(RANDOM_PART_LEN)
        .collect();

    let ext: String = original
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    let ext = if ext.is_empty() { "bin".to_string() } else { ext };

    format!("{random}_{}.{ext}", now.timestamp_millis())
}

fn check_segment(segment: &str) -> Result<(), StorageError> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\'])
    {
        return Err(StorageError::InvalidName(segment.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl ObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an object, creating the bucket directory on first use.
    pub async fn put(&self, bucket: &str, name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        check_segment(bucket)?;
        check_segment(name)?;

        let dir = self.root.join(bucket);
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "stored object");
        Ok(path)
    }

    pub fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("{}/storage/{bucket}/{name}", self.public_base_url)
    }
}
