//! Error types for the address book.
//!
//! One error hierarchy built with `thiserror`. Transport faults are absorbed by
//! endpoint failover; input and codec errors reach the caller.

use thiserror::Error;

/// Result type alias using `AddressBookError`.
pub type Result<T> = std::result::Result<T, AddressBookError>;

/// Main error type for all address book operations.
#[derive(Debug, Error)]
pub enum AddressBookError {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// An address-shaped string is not a valid 20-byte hex address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Input validation failed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CODEC ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Contract response is shorter than its layout or points out of range.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // TRANSPORT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed (connection, status, timeout, body).
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// A single endpoint could not answer the call.
    #[error("Transport fault at {endpoint}: {reason}")]
    TransportFault {
        /// Endpoint URL that faulted
        endpoint: String,
        /// What went wrong
        reason: String,
    },

    /// The node answered with a JSON-RPC error object.
    #[error("RPC call failed: {0}")]
    RpcError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AddressBookError {
    /// Returns true if this error means one endpoint failed and the next
    /// endpoint should be tried.
    pub fn is_transport_fault(&self) -> bool {
        matches!(
            self,
            AddressBookError::HttpError(_)
                | AddressBookError::TransportFault { .. }
                | AddressBookError::JsonError(_)
        )
    }

    /// Returns true if this error is recoverable (can retry later).
    pub fn is_recoverable(&self) -> bool {
        self.is_transport_fault() || matches!(self, AddressBookError::RpcError(_))
    }

    /// Returns true if the caller supplied bad input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AddressBookError::InvalidAddress(_)
                | AddressBookError::InvalidInput(_)
                | AddressBookError::ConfigError(_)
        )
    }
}
