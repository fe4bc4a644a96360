//! # Address Book Core
//!
//! Core types, errors, and traits shared by the address book crates.
//!
//! - **Types**: identity records, lookup kinds and keys, 20-byte addresses
//! - **Errors**: one error enum for input, codec and transport failures
//! - **Constants**: function selectors, default networks, cache defaults
//! - **Traits**: the HTTP primitive and the clock the resolver depends on
//!
//! ## Example
//!
//! ```rust
//! use addrbook_core::{LookupKey, LookupKind};
//!
//! let key = LookupKey::new("Alice");
//! assert_eq!(key.as_str(), "alice");
//! assert_eq!(LookupKind::Nickname.to_string(), "nickname");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod clock;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use clock::{ManualClock, SystemClock};
pub use constants::*;
pub use error::{AddressBookError, Result};
pub use traits::*;
pub use types::*;
