/// Network adapters for object store access
mod http_object_store;
mod s3_object_store;

pub use http_object_store::{shared_client, HttpObjectStore};
pub use s3_object_store::S3ObjectStore;
