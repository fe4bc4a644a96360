//! `reqwest`-backed HTTP primitive.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use addrbook_core::error::{AddressBookError, Result};
use addrbook_core::traits::HttpPost;
use addrbook_core::DEFAULT_HTTP_TIMEOUT_SECONDS;

/// HTTP client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }
}

/// JSON POST over `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    /// Creates a client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(HttpConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AddressBookError::ConfigError(format!("HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpPost for ReqwestHttp {
    #[instrument(skip(self, body))]
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AddressBookError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AddressBookError::HttpError(format!("{url} returned {status}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AddressBookError::HttpError(e.to_string()))?;

        debug!(url, "HTTP response received");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_json_roundtrip() {
        let server = MockServer::start().await;
        let body = serde_json::json!({"jsonrpc": "2.0", "id": 1});

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(header("content-type", "application/json"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let http = ReqwestHttp::new().unwrap();
        let reply = http
            .post_json(&format!("{}/rpc", server.uri()), &body)
            .await
            .unwrap();

        assert_eq!(reply["ok"], true);
    }

    #[tokio::test]
    async fn test_post_json_error_status_is_transport_fault() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = ReqwestHttp::new()
            .unwrap()
            .post_json(&server.uri(), &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(err.is_transport_fault());
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_post_json_unparsable_body_is_transport_fault() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
            .mount(&server)
            .await;

        let err = ReqwestHttp::new()
            .unwrap()
            .post_json(&server.uri(), &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(err.is_transport_fault());
    }

    #[tokio::test]
    async fn test_post_json_connection_refused_is_transport_fault() {
        // Port 9 (discard) is not listening on test hosts
        let err = ReqwestHttp::new()
            .unwrap()
            .post_json("http://127.0.0.1:9", &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(err.is_transport_fault());
    }
}
