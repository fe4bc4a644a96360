//! Scripted HTTP primitive.
//!
//! Serves canned JSON replies per URL and records every request, suitable for
//! tests and offline development.

use std::collections::VecDeque;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use addrbook_core::error::{AddressBookError, Result};
use addrbook_core::traits::HttpPost;

/// One canned reply.
#[derive(Clone, Debug)]
pub enum Reply {
    /// Respond with this JSON body
    Json(serde_json::Value),
    /// Fail as a transport fault with this reason
    Fault(String),
}

impl Reply {
    /// A JSON-RPC success envelope carrying `result`.
    pub fn result(result: impl Into<String>) -> Self {
        Reply::Json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": result.into()
        }))
    }

    /// A JSON-RPC success envelope with an empty (`0x`) result.
    pub fn empty() -> Self {
        Self::result("0x")
    }
}

/// HTTP primitive answering from per-URL scripts.
///
/// Replies for a URL are served in the order they were scripted; the last one
/// repeats once the queue is down to it. Unscripted URLs fault.
#[derive(Debug, Default)]
pub struct ScriptedHttp {
    scripts: DashMap<String, VecDeque<Reply>>,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedHttp {
    /// Creates an HTTP double with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reply to the script for `url`.
    pub fn script(&self, url: &str, reply: Reply) {
        self.scripts.entry(url.to_string()).or_default().push_back(reply);
    }

    /// Drops every script for `url`.
    pub fn clear_script(&self, url: &str) {
        self.scripts.remove(url);
    }

    /// URLs contacted, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(url, _)| url.clone()).collect()
    }

    /// Number of requests served.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Body of the most recent request.
    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.calls.lock().last().map(|(_, body)| body.clone())
    }

    fn next_reply(&self, url: &str) -> Option<Reply> {
        let mut queue = self.scripts.get_mut(url)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl HttpPost for ScriptedHttp {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        self.calls.lock().push((url.to_string(), body.clone()));

        match self.next_reply(url) {
            Some(Reply::Json(json)) => Ok(json),
            Some(Reply::Fault(reason)) => Err(AddressBookError::HttpError(reason)),
            None => Err(AddressBookError::HttpError(format!("no script for {url}"))),
        }
    }
}
