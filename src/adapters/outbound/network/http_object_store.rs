use crate::ports::outbound::DocumentStore;
use crate::shared::error::FetchError;
use crate::shared::security::validate_object_component;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;

const TIMEOUT_SECONDS: u64 = 30;

/// Process-wide HTTP client, built on first use and shared by every
/// invocation afterwards.
static SHARED_CLIENT: OnceCell<reqwest::Client> = OnceCell::const_new();

/// Returns the shared client, building it on first call
pub async fn shared_client() -> Result<&'static reqwest::Client, FetchError> {
    SHARED_CLIENT
        .get_or_try_init(|| async { build_client() })
        .await
}

fn build_client() -> Result<reqwest::Client, FetchError> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("kbom-query/{}", version);
    reqwest::Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECONDS))
        .user_agent(user_agent)
        .build()
        .map_err(|e| FetchError::Fetch(format!("Failed to build HTTP client: {}", e)))
}

/// HttpObjectStore adapter for S3-compatible object storage
///
/// Issues a path-style `GET {endpoint}/{bucket}/{key}` per read. Request
/// signing is not performed: the endpoint must accept the request as is
/// (public bucket, VPC endpoint policy, signing proxy, local emulator).
///
/// S3 answers 404 both for a missing key and for a missing bucket; only the
/// former is reported as `NotFound`.
pub struct HttpObjectStore {
    endpoint: String,
    client: Option<reqwest::Client>,
}

impl HttpObjectStore {
    pub const DEFAULT_ENDPOINT: &'static str = "https://s3.amazonaws.com";

    /// Creates a store that uses the process-wide shared client
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: None,
        }
    }

    /// Creates a store bound to its own client
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Some(client),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the path-style object URL
    ///
    /// # Errors
    /// Returns `FetchError::Fetch` if the bucket or key fails validation
    pub fn object_url(&self, bucket: &str, key: &str) -> Result<String, FetchError> {
        validate_object_component(bucket, "Bucket name")
            .and_then(|_| validate_object_component(key, "Object key"))
            .map_err(|e| FetchError::Fetch(e.to_string()))?;

        Ok(format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(bucket),
            urlencoding::encode(key)
        ))
    }

    async fn client(&self) -> Result<&reqwest::Client, FetchError> {
        match &self.client {
            Some(client) => Ok(client),
            None => shared_client().await,
        }
    }

    /// Maps a non-success response onto a fetch error
    fn error_for_status(status: StatusCode, key: &str, body: &str) -> FetchError {
        let error = S3ErrorBody::parse(body);

        if status == StatusCode::NOT_FOUND && !error.is_missing_bucket() {
            return FetchError::NotFound {
                key: key.to_string(),
            };
        }

        match error.message {
            Some(message) if !message.is_empty() => FetchError::Fetch(message),
            _ => FetchError::Fetch(format!("Object store returned status code {}", status)),
        }
    }
}

/// `<Error>` document returned by S3 for a failed request
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
struct S3ErrorBody {
    #[serde(rename = "Code")]
    code: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
}

impl S3ErrorBody {
    /// Decodes an error body; anything that is not an S3 error document
    /// yields an empty body
    fn parse(body: &str) -> Self {
        quick_xml::de::from_str::<S3ErrorBody>(body)
            .map(|error| S3ErrorBody {
                code: error.code.map(|code| code.trim().to_string()),
                message: error.message.map(|message| message.trim().to_string()),
            })
            .unwrap_or_default()
    }

    fn is_missing_bucket(&self) -> bool {
        self.code.as_deref() == Some("NoSuchBucket")
    }
}

#[async_trait]
impl DocumentStore for HttpObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.object_url(bucket, key)?;
        let client = self.client().await?;

        tracing::info!(bucket, key, "fetching report from object store");

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_for_status(status, key, &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Fetch(e.to_string()))?;
        tracing::debug!(bucket, key, size = bytes.len(), "report fetched");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const NO_SUCH_KEY: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message><Key>k8s_bom.json</Key></Error>";
    const NO_SUCH_BUCKET: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Error><Code>NoSuchBucket</Code><Message>The specified bucket does not exist</Message></Error>";
    const ACCESS_DENIED: &str = "<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>";

    /// Serves exactly one canned HTTP response; the handle yields the
    /// request line that was received
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn test_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn test_object_url_path_style() {
        let store = HttpObjectStore::new("https://s3.eu-west-1.amazonaws.com/");
        let url = store.object_url("kbom-reports", "k8s_bom.json").unwrap();
        assert_eq!(url, "https://s3.eu-west-1.amazonaws.com/kbom-reports/k8s_bom.json");
    }

    #[test]
    fn test_object_url_rejects_traversal() {
        let store = HttpObjectStore::new(HttpObjectStore::DEFAULT_ENDPOINT);
        let err = store.object_url("kbom-reports", "../other/k8s_bom.json").unwrap_err();
        assert!(matches!(err, FetchError::Fetch(_)));
    }

    #[test]
    fn test_s3_error_body_parse() {
        assert_eq!(
            S3ErrorBody::parse(NO_SUCH_KEY),
            S3ErrorBody {
                code: Some("NoSuchKey".to_string()),
                message: Some("The specified key does not exist.".to_string()),
            }
        );
        assert_eq!(
            S3ErrorBody::parse(ACCESS_DENIED).message.as_deref(),
            Some("Access Denied")
        );
        assert_eq!(S3ErrorBody::parse("not xml"), S3ErrorBody::default());
        assert_eq!(S3ErrorBody::parse(""), S3ErrorBody::default());
    }

    #[test]
    fn test_s3_error_body_decodes_entities() {
        let body = "<Error><Code>AccessDenied</Code><Message>User arn:x is not authorized: &quot;s3:GetObject&quot; &amp; more</Message></Error>";
        assert_eq!(
            HttpObjectStore::error_for_status(StatusCode::FORBIDDEN, "k8s_bom.json", body),
            FetchError::Fetch(
                "User arn:x is not authorized: \"s3:GetObject\" & more".to_string()
            )
        );
    }

    #[test]
    fn test_s3_error_body_reads_cdata() {
        let body = "<Error><Code><![CDATA[NoSuchBucket]]></Code><Message><![CDATA[The specified bucket does not exist]]></Message></Error>";
        assert_eq!(
            HttpObjectStore::error_for_status(StatusCode::NOT_FOUND, "k8s_bom.json", body),
            FetchError::Fetch("The specified bucket does not exist".to_string())
        );
    }

    #[test]
    fn test_error_for_status() {
        assert_eq!(
            HttpObjectStore::error_for_status(StatusCode::NOT_FOUND, "k8s_bom.json", NO_SUCH_KEY),
            FetchError::NotFound {
                key: "k8s_bom.json".to_string()
            }
        );
        assert_eq!(
            HttpObjectStore::error_for_status(StatusCode::NOT_FOUND, "k8s_bom.json", ""),
            FetchError::NotFound {
                key: "k8s_bom.json".to_string()
            }
        );
        assert_eq!(
            HttpObjectStore::error_for_status(StatusCode::NOT_FOUND, "k8s_bom.json", NO_SUCH_BUCKET),
            FetchError::Fetch("The specified bucket does not exist".to_string())
        );
        assert_eq!(
            HttpObjectStore::error_for_status(StatusCode::FORBIDDEN, "k8s_bom.json", ACCESS_DENIED),
            FetchError::Fetch("Access Denied".to_string())
        );
        assert_eq!(
            HttpObjectStore::error_for_status(StatusCode::BAD_GATEWAY, "k8s_bom.json", ""),
            FetchError::Fetch("Object store returned status code 502 Bad Gateway".to_string())
        );
    }

    #[tokio::test]
    async fn test_shared_client_is_reused() {
        let first = shared_client().await.unwrap();
        let second = shared_client().await.unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[tokio::test]
    async fn test_get_success() {
        let (endpoint, server) = serve_once("200 OK", r#"{"kbom":{"components":[]}}"#).await;
        let store = HttpObjectStore::with_client(endpoint, test_client());

        let bytes = store.get("kbom-reports", "k8s_bom.json").await.unwrap();
        assert_eq!(bytes, br#"{"kbom":{"components":[]}}"#.to_vec());

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /kbom-reports/k8s_bom.json HTTP/1.1");
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (endpoint, _server) = serve_once("404 Not Found", NO_SUCH_KEY).await;
        let store = HttpObjectStore::with_client(endpoint, test_client());

        let err = store.get("kbom-reports", "k8s_bom.json").await.unwrap_err();
        assert_eq!(err.to_string(), "File k8s_bom.json not found");
    }

    #[tokio::test]
    async fn test_get_access_denied() {
        let (endpoint, _server) = serve_once("403 Forbidden", ACCESS_DENIED).await;
        let store = HttpObjectStore::with_client(endpoint, test_client());

        let err = store.get("kbom-reports", "k8s_bom.json").await.unwrap_err();
        assert_eq!(err, FetchError::Fetch("Access Denied".to_string()));
    }

    #[tokio::test]
    async fn test_get_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = HttpObjectStore::with_client(format!("http://{}", addr), test_client());
        let err = store.get("kbom-reports", "k8s_bom.json").await.unwrap_err();
        assert!(matches!(err, FetchError::Fetch(_)));
    }
}
