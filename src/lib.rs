//! kbom-query - read-only query interface over a Kubernetes Bill of Materials report
//!
//! This library answers path-routed lookups (components, their dependencies,
//! vulnerabilities) against a single `k8s_bom.json` document held in an
//! object store, following hexagonal architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`report_query`): route classification, report model, projections
//! - **Application Layer** (`application`): the query use case, fetcher and DTOs
//! - **Ports** (`ports`): the inbound query entry point and the outbound store read
//! - **Adapters** (`adapters`): signed S3 store, unsigned HTTP store and local directory store
//! - **Shared** (`shared`): error taxonomy and common utilities
//!
//! # Example
//!
//! ```no_run
//! use kbom_query::prelude::*;
//!
//! # async fn run() {
//! let store = S3ObjectStore::new(None);
//! let router = QueryReportUseCase::new(store, ObjectLocation::report_in("kbom-reports"));
//!
//! let envelope = router.handle_path("/bom/etcd/grpc").await;
//! println!("{} {}", envelope.status_code, envelope.body);
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod report_query;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::filesystem::LocalObjectStore;
    pub use crate::adapters::outbound::network::{HttpObjectStore, S3ObjectStore};
    pub use crate::application::document_fetcher::DocumentFetcher;
    pub use crate::application::dto::{RequestEvent, ResponseEnvelope};
    pub use crate::application::factories::StoreFactory;
    pub use crate::application::use_cases::QueryReportUseCase;
    pub use crate::config::{ObjectLocation, QueryConfig, StoreConfig};
    pub use crate::ports::inbound::QueryPort;
    pub use crate::ports::outbound::DocumentStore;
    pub use crate::report_query::domain::{KbomReport, Route, VulnerabilityRecord};
    pub use crate::report_query::policies::VulnerabilityShape;
    pub use crate::report_query::services::{ReportProjector, RouteClassifier};
    pub use crate::shared::error::{FetchError, QueryError};
    pub use crate::shared::Result;
}
