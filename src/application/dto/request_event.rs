use serde::{Deserialize, Serialize};

/// RequestEvent - Inbound request DTO
///
/// Mirrors the HTTP-API event shape delivered by a serverless runtime.
/// Only `rawPath` is read; every other field of the event is ignored. The
/// method is not part of the DTO because all routes are reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    #[serde(default)]
    pub raw_path: Option<String>,
}

impl RequestEvent {
    pub fn from_path(path: &str) -> Self {
        Self {
            raw_path: Some(path.to_string()),
        }
    }

    /// The request path, `/` when the event carries none
    pub fn path(&self) -> &str {
        self.raw_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .unwrap_or("/")
    }
}
