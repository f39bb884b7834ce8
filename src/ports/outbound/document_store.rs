use crate::shared::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;

/// DocumentStore port for reading objects from blob storage
///
/// This port abstracts the object store holding the KBOM report
/// (an S3-compatible HTTP endpoint, a local directory, a test double).
///
/// # Async Support
/// Reads are async so a single invocation suspends only on this call.
/// Implementations must be `Send + Sync` so one store can serve any number
/// of concurrent invocations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a whole object
    ///
    /// # Arguments
    /// * `bucket` - Name of the bucket holding the object
    /// * `key` - Object key within the bucket
    ///
    /// # Returns
    /// The raw object bytes, fully materialized
    ///
    /// # Errors
    /// Returns:
    /// - `FetchError::NotFound` if the key does not exist in the bucket
    /// - `FetchError::Fetch` for any other transport, permission or
    ///   storage failure (including a missing bucket)
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Box<T> {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        (**self).get(bucket, key).await
    }
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        (**self).get(bucket, key).await
    }
}
