//! Domain types for the address book.
//!
//! - [`Address`]: 20-byte account address
//! - [`LookupKind`] / [`LookupKey`]: what is being resolved and by which key
//! - [`IdentityInfo`] / [`IdentityRecord`]: lookup results

mod address;
mod identity;

pub use address::*;
pub use identity::*;
