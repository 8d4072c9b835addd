//! HTTP transport for JSON-RPC request bodies.
//!
//! One `send` is exactly one HTTP POST: no retries, no pooling requirements,
//! no partial results. The caller gets the raw response body or a typed
//! failure.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RpcError, RpcResult};

/// Default connection establishment timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(8);

/// Default whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Reason phrase for the statuses treated as hard HTTP failures.
///
/// Statuses outside this set are not transport-level errors: the body is
/// returned as-is and the protocol layer judges it.
pub fn recognized_status_reason(code: u16) -> Option<&'static str> {
    Some(match code {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        408 => "Request Timeout",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => return None,
    })
}

/// Transport configuration.
///
/// Immutable once a transport is built. Overlays merge per key over the
/// defaults; they never replace the whole option set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Connection establishment timeout
    #[serde(with = "duration_millis")]
    pub connect_timeout: Duration,

    /// Whole-request timeout
    #[serde(with = "duration_millis")]
    pub timeout: Duration,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            headers: BTreeMap::new(),
        }
    }
}

impl TransportConfig {
    /// Set both timeouts.
    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    /// Add one extra header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merge `options` over the current headers, key by key.
    pub fn overlay(mut self, options: BTreeMap<String, String>) -> Self {
        for (name, value) in options {
            self.headers.insert(name, value);
        }
        self
    }
}

/// Serde helper for Duration in milliseconds.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Byte-level request transport.
///
/// Implemented over HTTP for production and by `MockTransport` in the test
/// utilities. One call is one round-trip; retry policy belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to the endpoint and return the raw response body, even if
    /// empty.
    async fn send(&self, body: Vec<u8>) -> RpcResult<Vec<u8>>;
}

/// HTTP implementation of [`Transport`].
///
/// Requests carry `Content-Type: application/json`; gzip/deflate response
/// compression is decoded transparently. TLS peer verification is disabled:
/// wallet endpoints are expected to sit on a private interface, often behind
/// self-signed certificates.
pub struct HttpTransport {
    /// HTTP client
    client: reqwest::Client,
    /// Endpoint URL (`http://host:port/json_rpc`)
    url: String,
}

impl HttpTransport {
    /// Create a transport for `url` with the given options.
    pub fn new(url: impl Into<String>, config: &TransportConfig) -> RpcResult<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RpcError::transport(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RpcError::transport(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .default_headers(headers)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| RpcError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The endpoint this transport posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").field("url", &self.url).finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: Vec<u8>) -> RpcResult<Vec<u8>> {
        debug!(url = %self.url, bytes = body.len(), "posting RPC request");

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| classify_send_error(&self.url, &e))?;

        let status = response.status().as_u16();
        if let Some(reason) = recognized_status_reason(status) {
            return Err(RpcError::HttpStatus {
                code: status,
                reason,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RpcError::transport(format!("failed to read response body: {e}")))?;
        Ok(bytes.to_vec())
    }
}

fn classify_send_error(url: &str, err: &reqwest::Error) -> RpcError {
    if err.is_connect() {
        RpcError::connect(url, err.to_string())
    } else {
        RpcError::transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_status_table() {
        assert_eq!(recognized_status_reason(400), Some("Bad Request"));
        assert_eq!(recognized_status_reason(408), Some("Request Timeout"));
        assert_eq!(recognized_status_reason(503), Some("Service Unavailable"));
        // Unlisted statuses pass the body through to the protocol layer.
        assert_eq!(recognized_status_reason(200), None);
        assert_eq!(recognized_status_reason(418), None);
        assert_eq!(recognized_status_reason(429), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = TransportConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(8));
        assert_eq!(config.timeout, Duration::from_secs(8));
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_overlay_merges_per_key() {
        let config = TransportConfig::default()
            .with_header("x-keep", "original")
            .with_header("x-replace", "original");

        let mut options = BTreeMap::new();
        options.insert("x-replace".to_string(), "overridden".to_string());
        options.insert("x-new".to_string(), "added".to_string());

        let merged = config.overlay(options);
        assert_eq!(merged.headers["x-keep"], "original");
        assert_eq!(merged.headers["x-replace"], "overridden");
        assert_eq!(merged.headers["x-new"], "added");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = TransportConfig::default().with_timeouts(
            Duration::from_millis(1500),
            Duration::from_secs(20),
        );
        let encoded = serde_json::to_string(&config).unwrap();
        assert!(encoded.contains("1500"));
        let decoded: TransportConfig = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.connect_timeout, Duration::from_millis(1500));
        assert_eq!(decoded.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_http_transport_rejects_bad_header() {
        let config = TransportConfig::default().with_header("bad header name", "x");
        assert!(HttpTransport::new("http://127.0.0.1:18083/json_rpc", &config).is_err());
    }
}
