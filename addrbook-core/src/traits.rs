//! Collaborator traits for the address book.
//!
//! The resolver only needs two things from its environment: a way to POST a
//! JSON body to a URL, and a clock. Both are traits so tests and embedders can
//! substitute their own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP PRIMITIVE
// ═══════════════════════════════════════════════════════════════════════════════

/// The HTTP transport primitive: `POST(url, json) -> json`.
///
/// Implementations report every failure to obtain a JSON body (connection
/// error, non-success status, timeout, unparsable body) as an error for which
/// [`AddressBookError::is_transport_fault`](crate::AddressBookError::is_transport_fault)
/// holds.
#[async_trait]
pub trait HttpPost: Send + Sync {
    /// Posts `body` to `url` and returns the parsed JSON response body.
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLOCK
// ═══════════════════════════════════════════════════════════════════════════════

/// Wall-clock timestamp source.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;
}
