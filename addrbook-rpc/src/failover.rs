//! Ordered endpoint failover.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use addrbook_core::traits::HttpPost;
use addrbook_core::Address;

use crate::eth_call::EthCallTransport;

/// How a failover walk ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallOutcome {
    /// An endpoint returned data.
    Data {
        /// Endpoint that answered
        endpoint: String,
        /// Raw hex result
        raw: String,
    },
    /// An endpoint answered with an empty result. A valid not-found.
    Empty {
        /// Endpoint that answered
        endpoint: String,
    },
    /// Every endpoint faulted.
    Exhausted {
        /// Number of endpoints tried
        attempts: usize,
    },
}

impl CallOutcome {
    /// The raw result, if any endpoint returned data.
    pub fn raw(&self) -> Option<&str> {
        match self {
            CallOutcome::Data { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Consumes the outcome into the raw result.
    pub fn into_raw(self) -> Option<String> {
        match self {
            CallOutcome::Data { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Returns true if no endpoint could answer.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CallOutcome::Exhausted { .. })
    }
}

/// Walks an ordered endpoint list once, stopping at the first answer.
///
/// Endpoints are tried strictly one after another with no delay. Only a
/// transport fault moves the walk forward; an empty result ends it.
#[derive(Clone)]
pub struct EndpointFailover {
    transport: EthCallTransport,
}

impl EndpointFailover {
    /// Creates a failover walker over an HTTP primitive.
    pub fn new(http: Arc<dyn HttpPost>) -> Self {
        Self {
            transport: EthCallTransport::new(http),
        }
    }

    /// Creates a failover walker over an existing transport.
    pub fn with_transport(transport: EthCallTransport) -> Self {
        Self { transport }
    }

    /// Calls `to` with `data`, trying `endpoints` in order.
    #[instrument(skip(self, endpoints, data), fields(endpoints = endpoints.len()))]
    pub async fn call(&self, endpoints: &[String], to: &Address, data: &str) -> CallOutcome {
        for endpoint in endpoints {
            match self.transport.call(endpoint, to, data).await {
                Ok(Some(raw)) => {
                    debug!(endpoint = %endpoint, "eth_call answered");
                    return CallOutcome::Data {
                        endpoint: endpoint.clone(),
                        raw,
                    };
                }
                Ok(None) => {
                    return CallOutcome::Empty {
                        endpoint: endpoint.clone(),
                    };
                }
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "Endpoint faulted, trying next");
                }
            }
        }

        warn!(attempts = endpoints.len(), "All endpoints faulted");
        CallOutcome::Exhausted {
            attempts: endpoints.len(),
        }
    }
}
