use crate::adapters::outbound::filesystem::LocalObjectStore;
use crate::adapters::outbound::network::{HttpObjectStore, S3ObjectStore};
use crate::application::use_cases::QueryReportUseCase;
use crate::config::{QueryConfig, StoreConfig};
use crate::ports::outbound::DocumentStore;

/// Factory for creating document stores and the router that uses them
///
/// This factory encapsulates the selection of the storage adapter from
/// configuration. It belongs in the application layer as it orchestrates
/// the choice of infrastructure adapters.
pub struct StoreFactory;

impl StoreFactory {
    /// Creates the store described by `config`
    ///
    /// # Examples
    /// ```
    /// use kbom_query::application::factories::StoreFactory;
    /// use kbom_query::config::StoreConfig;
    ///
    /// let store = StoreFactory::create(&StoreConfig::Local { root: "/srv/kbom".into() });
    /// ```
    pub fn create(config: &StoreConfig) -> Box<dyn DocumentStore> {
        match config {
            StoreConfig::S3 { endpoint } => Box::new(S3ObjectStore::new(endpoint.clone())),
            StoreConfig::Http { endpoint } => Box::new(HttpObjectStore::new(endpoint.clone())),
            StoreConfig::Local { root } => Box::new(LocalObjectStore::new(root.clone())),
        }
    }

    /// Creates a router over the configured store and report location
    pub fn create_router(config: &QueryConfig) -> QueryReportUseCase<Box<dyn DocumentStore>> {
        QueryReportUseCase::new(Self::create(&config.store), config.location.clone())
    }

    /// Describes the configured backend for log output
    pub fn describe(config: &StoreConfig) -> String {
        match config {
            StoreConfig::S3 { endpoint: None } => "Amazon S3".to_string(),
            StoreConfig::S3 {
                endpoint: Some(endpoint),
            } => format!("S3-compatible store at {}", endpoint),
            StoreConfig::Http { endpoint } => format!("object store at {} (unsigned)", endpoint),
            StoreConfig::Local { root } => format!("local directory {}", root.display()),
        }
    }
}
