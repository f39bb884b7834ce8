use crate::ports::outbound::DocumentStore;
use crate::shared::error::FetchError;
use crate::shared::security::{validate_object_component, validate_object_size, MAX_OBJECT_SIZE};
use async_trait::async_trait;
use dashmap::DashMap;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::Path;
use std::sync::Arc;

/// S3ObjectStore adapter for Amazon S3 with signed requests
///
/// Credentials and region come from the standard AWS environment
/// (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN`,
/// `AWS_REGION`, web identity, container and instance metadata).
/// One client is built per bucket on first use and reused afterwards.
pub struct S3ObjectStore {
    endpoint: Option<String>,
    buckets: DashMap<String, Arc<dyn ObjectStore>>,
}

impl S3ObjectStore {
    /// Creates a store against AWS, or against an S3-compatible `endpoint`
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint,
            buckets: DashMap::new(),
        }
    }

    /// Serves `bucket` from an already constructed object store
    pub fn with_bucket_store(
        self,
        bucket: impl Into<String>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        self.buckets.insert(bucket.into(), store);
        self
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn bucket_store(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>, FetchError> {
        if let Some(store) = self.buckets.get(bucket) {
            return Ok(Arc::clone(store.value()));
        }

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
        if let Some(endpoint) = &self.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store: Arc<dyn ObjectStore> = Arc::new(
            builder
                .build()
                .map_err(|e| FetchError::Fetch(format!("Failed to configure S3 client: {}", e)))?,
        );
        tracing::debug!(bucket, "S3 client created");

        self.buckets.insert(bucket.to_string(), Arc::clone(&store));
        Ok(store)
    }
}

#[async_trait]
impl DocumentStore for S3ObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        validate_object_component(bucket, "Bucket name")
            .and_then(|_| validate_object_component(key, "Object key"))
            .map_err(|e| FetchError::Fetch(e.to_string()))?;

        let store = self.bucket_store(bucket)?;
        let location = ObjectPath::parse(key)
            .map_err(|e| FetchError::Fetch(format!("Invalid object key: {}", e)))?;

        tracing::info!(bucket, key, "fetching report from S3");

        let result = store
            .get(&location)
            .await
            .map_err(|e| store_error(e, key))?;

        validate_object_size(result.meta.size as u64, Path::new(key), MAX_OBJECT_SIZE)
            .map_err(|e| FetchError::Fetch(e.to_string()))?;

        let bytes = result.bytes().await.map_err(|e| store_error(e, key))?;
        tracing::debug!(bucket, key, size = bytes.len(), "report fetched");
        Ok(bytes.to_vec())
    }
}

/// Maps an object store failure onto a fetch error
///
/// S3 answers 404 for a missing bucket as well; the `NoSuchBucket` code is
/// only visible in the error text, so it is checked there.
fn store_error(err: object_store::Error, key: &str) -> FetchError {
    let missing_bucket = err.to_string().contains("NoSuchBucket");

    match err {
        object_store::Error::NotFound { .. } if missing_bucket => {
            FetchError::Fetch("The specified bucket does not exist".to_string())
        }
        object_store::Error::NotFound { .. } => FetchError::NotFound {
            key: key.to_string(),
        },
        object_store::Error::PermissionDenied { .. }
        | object_store::Error::Unauthenticated { .. } => {
            FetchError::Fetch("Access Denied".to_string())
        }
        other => FetchError::Fetch(other.to_string()),
    }
}
