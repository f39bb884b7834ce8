use crate::config::ObjectLocation;
use crate::ports::outbound::DocumentStore;
use crate::report_query::domain::KbomReport;
use crate::shared::error::FetchError;
use serde_json::Value;

/// DocumentFetcher - reads and parses the report object
///
/// The whole object is read and parsed before anything else looks at it.
/// No retries.
pub struct DocumentFetcher;

impl DocumentFetcher {
    /// Fetches the report at `location` from `store`
    ///
    /// # Errors
    /// - `FetchError::NotFound` / `FetchError::Fetch` as reported by the store
    /// - `FetchError::Parse` if the object is not UTF-8 JSON
    pub async fn fetch<S>(store: &S, location: &ObjectLocation) -> Result<KbomReport, FetchError>
    where
        S: DocumentStore + ?Sized,
    {
        let bytes = store.get(&location.bucket, &location.key).await?;
        Self::decode(&location.key, &bytes)
    }

    /// Decodes raw object bytes into a report
    pub fn decode(key: &str, bytes: &[u8]) -> Result<KbomReport, FetchError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| FetchError::Parse(format!("{} is not valid UTF-8: {}", key, e)))?;

        let document: Value = serde_json::from_str(text)
            .map_err(|e| FetchError::Parse(format!("Failed to parse {}: {}", key, e)))?;

        Ok(KbomReport::new(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid_json() {
        let report = DocumentFetcher::decode("k8s_bom.json", br#"{"kbom":{"components":[]}}"#).unwrap();
        assert_eq!(report.document(), &json!({"kbom": {"components": []}}));
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = DocumentFetcher::decode("k8s_bom.json", b"{not json").unwrap_err();
        assert!(matches!(err, FetchError::Parse(ref message) if message.starts_with("Failed to parse k8s_bom.json")));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = DocumentFetcher::decode("k8s_bom.json", &[0x7b, 0xff, 0x7d]).unwrap_err();
        assert!(matches!(err, FetchError::Parse(ref message) if message.contains("not valid UTF-8")));
    }

    #[test]
    fn test_decode_accepts_non_object_roots() {
        let report = DocumentFetcher::decode("k8s_bom.json", b"[]").unwrap();
        assert!(report.components().is_empty());
    }
}
