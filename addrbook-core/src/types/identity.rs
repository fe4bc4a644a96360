//! Identity records and lookup keys.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Address;
use crate::constants::{SELECTOR_BY_ADDRESS, SELECTOR_BY_EMAIL, SELECTOR_BY_NICKNAME, SELECTOR_SIZE};

// ═══════════════════════════════════════════════════════════════════════════════
// LOOKUP KIND
// ═══════════════════════════════════════════════════════════════════════════════

/// Which lookup produced a record. Determines selector and cache store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    /// Lookup by registered nickname
    Nickname,
    /// Lookup by registered email
    Email,
    /// Lookup by account address
    Address,
}

impl LookupKind {
    /// All lookup kinds.
    pub const ALL: [LookupKind; 3] = [LookupKind::Nickname, LookupKind::Email, LookupKind::Address];

    /// Contract function selector for this lookup.
    pub fn selector(&self) -> [u8; SELECTOR_SIZE] {
        match self {
            LookupKind::Nickname => SELECTOR_BY_NICKNAME,
            LookupKind::Email => SELECTOR_BY_EMAIL,
            LookupKind::Address => SELECTOR_BY_ADDRESS,
        }
    }

    /// Lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Nickname => "nickname",
            LookupKind::Email => "email",
            LookupKind::Address => "address",
        }
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LookupKind {
    type Err = crate::AddressBookError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nickname" | "nick" => Ok(LookupKind::Nickname),
            "email" => Ok(LookupKind::Email),
            "address" | "addr" => Ok(LookupKind::Address),
            other => Err(crate::AddressBookError::InvalidInput(format!(
                "unknown lookup kind '{other}'"
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOOKUP KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// Lower-cased lookup input. Cache key and, for nickname/email, call parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    /// Normalizes `raw` into a key.
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    /// Borrows the normalized key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for LookupKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for LookupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Decoded identity payload. Every string is present, possibly empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityInfo {
    /// Registered account address
    pub address: Address,
    /// Registered email
    pub email: String,
    /// Registered nickname
    pub nickname: String,
    /// Avatar reference (e.g. `ipfs://...`)
    pub avatar: String,
    /// Free-form profile text
    pub free_text: String,
}

/// Result of one lookup. `info == None` is a valid not-found result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    /// Identity, present only when the contract returned a registered entry
    pub info: Option<IdentityInfo>,
    /// When this record was produced
    pub resolved_at: DateTime<Utc>,
    /// Lookup kind that produced it
    pub resolved_by: LookupKind,
}

impl IdentityRecord {
    /// A found record.
    pub fn found(info: IdentityInfo, resolved_by: LookupKind, resolved_at: DateTime<Utc>) -> Self {
        Self {
            info: Some(info),
            resolved_at,
            resolved_by,
        }
    }

    /// A not-found record.
    pub fn not_found(resolved_by: LookupKind, resolved_at: DateTime<Utc>) -> Self {
        Self {
            info: None,
            resolved_at,
            resolved_by,
        }
    }

    /// Returns true if an identity was found.
    pub fn is_found(&self) -> bool {
        self.info.is_some()
    }

    /// A record is fresh while `now - resolved_at < ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.resolved_at < ttl
    }
}

/// Per-call resolution options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Skip the cache read (the result is still written back)
    #[serde(default)]
    pub force_request: bool,
}

impl ResolveOptions {
    /// Options that bypass the cache read.
    pub fn forced() -> Self {
        Self { force_request: true }
    }
}
