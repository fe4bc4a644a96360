//! # Address Book Resolver
//!
//! Resolves nicknames, emails and addresses against the on-chain address book
//! contract, with per-kind caching and ordered endpoint failover.
//!
//! ## Example
//!
//! ```rust,no_run
//! use addrbook_core::ResolveOptions;
//! use addrbook_resolver::{AddressBook, AddressBookOptions};
//!
//! async fn lookup() -> addrbook_core::Result<()> {
//!     let book = AddressBook::new(AddressBookOptions::new().with_cache_resolve(true))?;
//!     let record = book.resolve_by_nickname("alice", ResolveOptions::default()).await?;
//!     if let Some(info) = record.info {
//!         println!("{} -> {}", info.nickname, info.address);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod resolver;

pub use config::{AddressBookOptions, CacheOptions, ResolverConfig};
pub use resolver::AddressBook;

use addrbook_core::{IdentityRecord, ResolveOptions, Result};

/// Resolves a nickname once with a fresh address book.
pub async fn resolve_by_nickname(nickname: &str, options: AddressBookOptions) -> Result<IdentityRecord> {
    AddressBook::new(options)?
        .resolve_by_nickname(nickname, ResolveOptions::default())
        .await
}

/// Resolves an email once with a fresh address book.
pub async fn resolve_by_email(email: &str, options: AddressBookOptions) -> Result<IdentityRecord> {
    AddressBook::new(options)?
        .resolve_by_email(email, ResolveOptions::default())
        .await
}

/// Resolves an address once with a fresh address book.
pub async fn resolve_by_address(address: &str, options: AddressBookOptions) -> Result<IdentityRecord> {
    AddressBook::new(options)?
        .resolve_by_address(address, ResolveOptions::default())
        .await
}
