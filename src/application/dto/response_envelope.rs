use crate::shared::error::QueryError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// ResponseEnvelope - Outbound response DTO
///
/// Wire shape: `{ "statusCode": int, "headers": {...}, "body": "<json>" }`.
/// `body` is itself a JSON document serialized to a string: the payload on
/// success, `{"error": "<message>"}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    pub fn new(status_code: u16, body: &Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            CONTENT_TYPE_HEADER.to_string(),
            JSON_CONTENT_TYPE.to_string(),
        );

        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn ok(payload: &Value) -> Self {
        Self::new(200, payload)
    }

    pub fn error(err: &QueryError) -> Self {
        Self::new(err.status_code(), &json!({ "error": err.to_string() }))
    }

    pub fn from_result(result: Result<Value, QueryError>) -> Self {
        match result {
            Ok(payload) => Self::ok(&payload),
            Err(err) => Self::error(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Parses `body` back into JSON
    pub fn json_body(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}
