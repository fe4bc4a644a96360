//! Single-endpoint `eth_call`.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use addrbook_core::error::{AddressBookError, Result};
use addrbook_core::traits::HttpPost;
use addrbook_core::{Address, BLOCK_TAG_LATEST};

/// Builds the JSON-RPC 2.0 `eth_call` envelope.
pub fn eth_call_request(to: &Address, data: &str) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": "eth_call",
        "params": [
            {
                "to": to.to_hex_string(),
                "data": data
            },
            BLOCK_TAG_LATEST
        ],
        "id": 1
    })
}

/// Returns true for results that carry no data: `""`, `"0x"`, or only zeros.
pub fn is_empty_result(result: &str) -> bool {
    let digits = result.strip_prefix("0x").unwrap_or(result);
    digits.chars().all(|c| c == '0')
}

/// `eth_call` against one endpoint at a time.
#[derive(Clone)]
pub struct EthCallTransport {
    http: Arc<dyn HttpPost>,
}

impl EthCallTransport {
    /// Creates a transport over an HTTP primitive.
    pub fn new(http: Arc<dyn HttpPost>) -> Self {
        Self { http }
    }

    /// Issues one `eth_call`.
    ///
    /// `Ok(Some(hex))` carries the raw result, `Ok(None)` is a well-formed
    /// empty answer, and `Err` is a transport fault at `endpoint`.
    #[instrument(skip(self, data))]
    pub async fn call(&self, endpoint: &str, to: &Address, data: &str) -> Result<Option<String>> {
        let request = eth_call_request(to, data);

        let json = self
            .http
            .post_json(endpoint, &request)
            .await
            .map_err(|e| AddressBookError::TransportFault {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        classify_response(endpoint, &json)
    }
}

/// Splits a JSON-RPC reply into data, empty, or fault.
fn classify_response(endpoint: &str, json: &serde_json::Value) -> Result<Option<String>> {
    let fault = |reason: &str| AddressBookError::TransportFault {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
    };

    if !json.is_object() {
        return Err(fault("response is not a JSON object"));
    }

    if let Some(error) = json.get("error").filter(|e| !e.is_null()) {
        warn!(endpoint, error = %error, "eth_call returned an RPC error");
        return Ok(None);
    }

    match json.get("result") {
        Some(serde_json::Value::String(result)) if is_empty_result(result) => {
            debug!(endpoint, "eth_call returned an empty result");
            Ok(None)
        }
        Some(serde_json::Value::String(result)) => Ok(Some(result.clone())),
        Some(serde_json::Value::Null) => Ok(None),
        Some(other) => Err(fault(&format!("unexpected result type: {other}"))),
        None => Err(fault("response has neither result nor error")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::scripted::{Reply, ScriptedHttp};

    const ENDPOINT: &str = "https://rpc.example";

    fn contract() -> Address {
        Address::from_array([0x32; 20])
    }

    #[test]
    fn test_request_envelope() {
        let req = eth_call_request(&contract(), "0x1420eb16");

        assert_eq!(req["jsonrpc"], "2.0");
        assert_eq!(req["method"], "eth_call");
        assert_eq!(req["id"], 1);
        assert_eq!(req["params"][0]["to"], format!("0x{}", "32".repeat(20)));
        assert_eq!(req["params"][0]["data"], "0x1420eb16");
        assert_eq!(req["params"][1], "latest");
    }

    #[test]
    fn test_empty_results() {
        assert!(is_empty_result("0x"));
        assert!(is_empty_result(""));
        assert!(is_empty_result("0x0000"));
        assert!(!is_empty_result("0x01"));
    }

    #[test]
    fn test_classify_data() {
        let reply = json!({"jsonrpc": "2.0", "id": 1, "result": "0xabcd"});
        assert_eq!(classify_response(ENDPOINT, &reply).unwrap(), Some("0xabcd".into()));
    }

    #[test]
    fn test_classify_empty_and_rpc_error_are_answers() {
        for reply in [
            json!({"jsonrpc": "2.0", "id": 1, "result": "0x"}),
            json!({"jsonrpc": "2.0", "id": 1, "result": null}),
            json!({"jsonrpc": "2.0", "id": 1, "error": {"code": 3, "message": "execution reverted"}}),
        ] {
            assert_eq!(classify_response(ENDPOINT, &reply).unwrap(), None, "{reply}");
        }
    }

    #[test]
    fn test_classify_malformed_envelopes_are_faults() {
        for reply in [
            json!({"jsonrpc": "2.0", "id": 1}),
            json!({"jsonrpc": "2.0", "id": 1, "result": 42}),
            json!("not an object"),
        ] {
            let err = classify_response(ENDPOINT, &reply).unwrap_err();
            assert!(err.is_transport_fault(), "{reply}");
        }
    }

    #[tokio::test]
    async fn test_call_sends_envelope_to_endpoint() {
        let http = Arc::new(ScriptedHttp::new());
        http.script(ENDPOINT, Reply::result("0xbeef"));
        let transport = EthCallTransport::new(http.clone());

        let raw = transport.call(ENDPOINT, &contract(), "0x0bdc37cd").await.unwrap();

        assert_eq!(raw.as_deref(), Some("0xbeef"));
        assert_eq!(http.calls(), vec![ENDPOINT.to_string()]);
        assert_eq!(http.last_body().unwrap()["params"][0]["data"], "0x0bdc37cd");
    }

    #[tokio::test]
    async fn test_call_http_failure_names_endpoint() {
        let http = Arc::new(ScriptedHttp::new());
        http.script(ENDPOINT, Reply::Fault("connection reset".into()));
        let transport = EthCallTransport::new(http);

        let err = transport.call(ENDPOINT, &contract(), "0x").await.unwrap_err();

        assert!(matches!(
            err,
            AddressBookError::TransportFault { ref endpoint, .. } if endpoint == ENDPOINT
        ));
    }
}
