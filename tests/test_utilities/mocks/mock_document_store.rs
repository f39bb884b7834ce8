use async_trait::async_trait;
use kbom_query::ports::outbound::DocumentStore;
use kbom_query::shared::error::FetchError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock DocumentStore for testing
///
/// Holds objects in memory keyed by `(bucket, key)`; a missing entry is
/// reported as `NotFound`, like a missing S3 key.
pub struct MockDocumentStore {
    objects: HashMap<(String, String), Vec<u8>>,
    failure: Option<FetchError>,
    reads: AtomicUsize,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            failure: None,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn with_object(mut self, bucket: &str, key: &str, content: &[u8]) -> Self {
        self.objects
            .insert((bucket.to_string(), key.to_string()), content.to_vec());
        self
    }

    pub fn with_report(self, bucket: &str, report: &Value) -> Self {
        self.with_object(bucket, "k8s_bom.json", report.to_string().as_bytes())
    }

    pub fn with_failure(message: &str) -> Self {
        Self {
            failure: Some(FetchError::Fetch(message.to_string())),
            ..Self::new()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }

        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                key: key.to_string(),
            })
    }
}
