use crate::ports::outbound::DocumentStore;
use crate::shared::error::FetchError;
use crate::shared::security::{validate_object_component, validate_object_metadata};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// LocalObjectStore adapter backed by a directory tree
///
/// Layout: `{root}/{bucket}/{key}`. Used for development and tests in
/// place of a real object store; the error mapping follows S3 (missing key
/// is `NotFound`, missing bucket is a fetch failure).
///
/// # Security
/// - Bucket names and keys may not contain path separators or `..`
/// - Symbolic links are rejected
/// - Objects larger than 100 MB are rejected
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<(PathBuf, PathBuf), FetchError> {
        validate_object_component(bucket, "Bucket name")
            .and_then(|_| validate_object_component(key, "Object key"))
            .map_err(|e| FetchError::Fetch(e.to_string()))?;

        let bucket_path = self.root.join(bucket);
        let object_path = bucket_path.join(key);
        Ok((bucket_path, object_path))
    }
}

#[async_trait]
impl DocumentStore for LocalObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        let (bucket_path, object_path) = self.object_path(bucket, key)?;

        match tokio::fs::metadata(&bucket_path).await {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(FetchError::Fetch(format!(
                    "{} is not a bucket directory",
                    bucket_path.display()
                )))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::Fetch(
                    "The specified bucket does not exist".to_string(),
                ))
            }
            Err(e) => return Err(FetchError::Fetch(e.to_string())),
        }

        let metadata = match tokio::fs::symlink_metadata(&object_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::NotFound {
                    key: key.to_string(),
                })
            }
            Err(e) => return Err(FetchError::Fetch(e.to_string())),
        };

        validate_object_metadata(&metadata, &object_path)
            .map_err(|e| FetchError::Fetch(e.to_string()))?;

        tracing::info!(path = %object_path.display(), "reading report from local store");

        tokio::fs::read(&object_path)
            .await
            .map_err(|e| FetchError::Fetch(format!("Failed to read {}: {}", object_path.display(), e)))
    }
}
