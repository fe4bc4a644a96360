//! # Address Book RPC
//!
//! `eth_call` against an ordered list of JSON-RPC endpoints.
//!
//! - [`ReqwestHttp`]: the HTTP primitive, backed by `reqwest`
//! - [`EthCallTransport`]: one `eth_call` round-trip against one endpoint
//! - [`EndpointFailover`]: tries endpoints in order until one answers
//! - [`ScriptedHttp`]: canned responses for tests and offline development
//!
//! A transport fault (connection error, bad status, unparsable body) moves on
//! to the next endpoint. A well-formed empty result is an answer and stops the
//! walk.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod eth_call;
mod failover;
mod http;
mod scripted;

pub use eth_call::{eth_call_request, is_empty_result, EthCallTransport};
pub use failover::{CallOutcome, EndpointFailover};
pub use http::{HttpConfig, ReqwestHttp};
pub use scripted::{Reply, ScriptedHttp};
