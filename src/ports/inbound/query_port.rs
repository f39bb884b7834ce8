use crate::application::dto::{RequestEvent, ResponseEnvelope};
use async_trait::async_trait;

/// QueryPort - Inbound port for the report query use case
///
/// One call is one request-scoped invocation. Implementations never fail:
/// every error is folded into the returned envelope.
#[async_trait]
pub trait QueryPort: Send + Sync {
    /// Answers one request event
    ///
    /// # Arguments
    /// * `event` - The incoming request; only its path is significant
    ///
    /// # Returns
    /// The response envelope with status code, headers and JSON body
    async fn handle(&self, event: RequestEvent) -> ResponseEnvelope;

    /// Answers a bare request path
    async fn handle_path(&self, path: &str) -> ResponseEnvelope {
        self.handle(RequestEvent::from_path(path)).await
    }
}
