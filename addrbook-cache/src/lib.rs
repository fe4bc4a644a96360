//! Cache of resolved identity records, one store per lookup kind.
//!
//! Stores never expire entries on their own; freshness is judged by the reader
//! against a TTL at read time.

mod cache;

pub use cache::{CacheStats, CacheStore, ResolutionCache};
