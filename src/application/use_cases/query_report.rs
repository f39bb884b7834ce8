use crate::application::document_fetcher::DocumentFetcher;
use crate::application::dto::{RequestEvent, ResponseEnvelope};
use crate::config::ObjectLocation;
use crate::ports::inbound::QueryPort;
use crate::ports::outbound::DocumentStore;
use crate::report_query::services::{ReportProjector, RouteClassifier};
use crate::shared::error::QueryError;
use async_trait::async_trait;
use serde_json::Value;

/// QueryReportUseCase - the query router
///
/// Runs one invocation as a linear pipeline:
/// path → route → fetch (once) → projection → envelope.
/// The report is fetched fresh for every invocation and dropped afterwards;
/// a path that matches no route is rejected before any fetch.
///
/// # Type Parameters
/// * `S` - DocumentStore implementation
pub struct QueryReportUseCase<S> {
    store: S,
    location: ObjectLocation,
}

impl<S: DocumentStore> QueryReportUseCase<S> {
    /// Creates a new QueryReportUseCase with an injected store
    pub fn new(store: S, location: ObjectLocation) -> Self {
        Self { store, location }
    }

    pub fn location(&self) -> &ObjectLocation {
        &self.location
    }

    /// Executes the query for `path`
    ///
    /// # Returns
    /// The payload for a 200 response
    ///
    /// # Errors
    /// Any `QueryError`; callers normally go through [`QueryPort::handle`],
    /// which folds errors into the envelope.
    pub async fn execute(&self, path: &str) -> Result<Value, QueryError> {
        let route = RouteClassifier::classify(path)?;
        tracing::debug!(path, %route, "route matched");

        let report = DocumentFetcher::fetch(&self.store, &self.location).await?;
        ReportProjector::project(report, &route)
    }
}

#[async_trait]
impl<S: DocumentStore> QueryPort for QueryReportUseCase<S> {
    async fn handle(&self, event: RequestEvent) -> ResponseEnvelope {
        let path = event.path();
        let result = self.execute(path).await;

        match &result {
            Ok(_) => tracing::debug!(path, status = 200, "query answered"),
            Err(err) => {
                tracing::warn!(path, status = err.status_code(), error = %err, "query failed")
            }
        }

        ResponseEnvelope::from_result(result)
    }
}
