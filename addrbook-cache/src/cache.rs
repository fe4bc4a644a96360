//! In-memory stores of identity records keyed by normalized lookup key.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use addrbook_core::{IdentityRecord, LookupKey, LookupKind};

/// Unbounded key → record store for one lookup kind.
///
/// Thread-safe. Concurrent writes to the same key are last-write-wins.
#[derive(Default)]
pub struct CacheStore {
    entries: RwLock<HashMap<LookupKey, IdentityRecord>>,
}

impl CacheStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a cached record, fresh or not.
    pub fn get(&self, key: &LookupKey) -> Option<IdentityRecord> {
        self.entries.read().get(key).cloned()
    }

    /// Gets a cached record only if it is fresh at `now`.
    pub fn get_fresh(&self, key: &LookupKey, now: DateTime<Utc>, ttl: Duration) -> Option<IdentityRecord> {
        self.entries
            .read()
            .get(key)
            .filter(|record| record.is_fresh(now, ttl))
            .cloned()
    }

    /// Stores a record, replacing any previous one.
    pub fn put(&self, key: LookupKey, record: IdentityRecord) {
        self.entries.write().insert(key, record);
    }

    /// Removes a cached entry.
    pub fn delete(&self, key: &LookupKey) -> Option<IdentityRecord> {
        self.entries.write().remove(key)
    }

    /// Clears all cached entries.
    pub fn clear_all(&self) {
        self.entries.write().clear();
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns store statistics as seen at `now` with freshness window `ttl`.
    pub fn stats(&self, now: DateTime<Utc>, ttl: Duration) -> CacheStats {
        let entries = self.entries.read();
        let fresh = entries.values().filter(|r| r.is_fresh(now, ttl)).count();
        let found = entries.values().filter(|r| r.is_found()).count();
        CacheStats {
            total_entries: entries.len(),
            fresh_entries: fresh,
            stale_entries: entries.len().saturating_sub(fresh),
            found_entries: found,
        }
    }
}

/// Cache statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Total entries (including stale)
    pub total_entries: usize,
    /// Entries still inside the TTL
    pub fresh_entries: usize,
    /// Entries past the TTL, awaiting lazy eviction
    pub stale_entries: usize,
    /// Entries holding an identity (the rest are cached not-found results)
    pub found_entries: usize,
}

/// The three per-kind stores.
#[derive(Default)]
pub struct ResolutionCache {
    nickname: CacheStore,
    email: CacheStore,
    address: CacheStore,
}

impl ResolutionCache {
    /// Creates empty stores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store for one lookup kind.
    pub fn store(&self, kind: LookupKind) -> &CacheStore {
        match kind {
            LookupKind::Nickname => &self.nickname,
            LookupKind::Email => &self.email,
            LookupKind::Address => &self.address,
        }
    }

    /// Clears every store.
    pub fn clear_all(&self) {
        for kind in LookupKind::ALL {
            self.store(kind).clear_all();
        }
    }
}
