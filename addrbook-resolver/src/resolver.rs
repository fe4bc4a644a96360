//! The address book facade: cache, encode, call, decode, classify, store.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use addrbook_abi::{decode_identity, encode_call_hex, AbiParam};
use addrbook_cache::{CacheStats, ResolutionCache};
use addrbook_core::error::{AddressBookError, Result};
use addrbook_core::traits::{Clock, HttpPost};
use addrbook_core::{Address, IdentityRecord, LookupKey, LookupKind, ResolveOptions, SystemClock};
use addrbook_rpc::{CallOutcome, EndpointFailover, ReqwestHttp};

use crate::config::{normalize_cache_time, validate_endpoints, AddressBookOptions, ResolverConfig};

/// Resolves nicknames, emails and addresses to identity records.
///
/// Resolution for one key goes:
/// 1. Check the per-kind cache (unless disabled or forced); a stale entry is evicted
/// 2. Encode the lookup call for the key's kind
/// 3. Send it through the endpoint list in order until one endpoint answers
/// 4. Decode the tuple; a zero token id is "not found"
/// 5. Store the record and return it
///
/// If every endpoint faults the caller gets a not-found record that is not
/// cached. A payload that fails to decode is returned as an error.
pub struct AddressBook {
    config: RwLock<Arc<ResolverConfig>>,
    cache: ResolutionCache,
    failover: EndpointFailover,
    clock: Arc<dyn Clock>,
}

impl AddressBook {
    /// Creates an address book over HTTP with the system clock.
    pub fn new(options: AddressBookOptions) -> Result<Self> {
        Self::with_parts(options, Arc::new(ReqwestHttp::new()?), Arc::new(SystemClock))
    }

    /// Creates an address book over a custom HTTP primitive and clock.
    pub fn with_parts(
        options: AddressBookOptions,
        http: Arc<dyn HttpPost>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let config = ResolverConfig::from_options(&options)?;
        debug!(endpoints = config.endpoints.len(), contract = %config.contract, "Address book configured");

        Ok(Self {
            config: RwLock::new(Arc::new(config)),
            cache: ResolutionCache::new(),
            failover: EndpointFailover::new(http),
            clock,
        })
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<ResolverConfig> {
        self.config.read().clone()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // RESOLUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Resolves a nickname.
    pub async fn resolve_by_nickname(&self, nickname: &str, options: ResolveOptions) -> Result<IdentityRecord> {
        self.resolve(LookupKind::Nickname, nickname, options).await
    }

    /// Resolves an email.
    pub async fn resolve_by_email(&self, email: &str, options: ResolveOptions) -> Result<IdentityRecord> {
        self.resolve(LookupKind::Email, email, options).await
    }

    /// Resolves an address. Fails with `InvalidAddress` before any network call
    /// if `address` is not 40 hex characters.
    pub async fn resolve_by_address(&self, address: &str, options: ResolveOptions) -> Result<IdentityRecord> {
        self.resolve(LookupKind::Address, address, options).await
    }

    /// Resolves `key` as a lookup of `kind`.
    #[instrument(skip(self))]
    pub async fn resolve(&self, kind: LookupKind, key: &str, options: ResolveOptions) -> Result<IdentityRecord> {
        let config = self.config();
        let key = cache_key(kind, key);

        if config.cache_resolve && !options.force_request {
            if let Some(record) = self.cached(kind, &key, &config) {
                return Ok(record);
            }
        }

        let data = encode_call_hex(kind.selector(), &[call_param(kind, &key)?]);
        let outcome = self.failover.call(&config.endpoints, &config.contract, &data).await;
        let now = self.clock.now();

        let record = match outcome {
            CallOutcome::Data { endpoint, raw } => {
                let decoded = decode_identity(&raw)?;
                if decoded.is_registered() {
                    info!(%key, %kind, endpoint = %endpoint, "Resolved identity");
                    IdentityRecord::found(decoded.into_info(), kind, now)
                } else {
                    debug!(%key, %kind, endpoint = %endpoint, "Identity not registered");
                    IdentityRecord::not_found(kind, now)
                }
            }
            CallOutcome::Empty { endpoint } => {
                debug!(%key, %kind, endpoint = %endpoint, "Empty result");
                IdentityRecord::not_found(kind, now)
            }
            CallOutcome::Exhausted { attempts } => {
                warn!(%key, %kind, attempts, "No endpoint answered, result not cached");
                return Ok(IdentityRecord::not_found(kind, now));
            }
        };

        self.cache.store(kind).put(key, record.clone());
        Ok(record)
    }

    /// Returns a fresh cached record, evicting it if stale.
    fn cached(&self, kind: LookupKind, key: &LookupKey, config: &ResolverConfig) -> Option<IdentityRecord> {
        let store = self.cache.store(kind);

        if let Some(record) = store.get_fresh(key, self.clock.now(), config.ttl()) {
            debug!(%key, %kind, "Cache hit");
            return Some(record);
        }

        if store.delete(key).is_some() {
            debug!(%key, %kind, "Stale cache entry evicted");
        }
        None
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // EXISTENCE CHECKS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns true if a nickname is registered.
    pub async fn is_nickname_exists(&self, nickname: &str, options: ResolveOptions) -> Result<bool> {
        self.exists(LookupKind::Nickname, nickname, options).await
    }

    /// Returns true if an email is registered.
    pub async fn is_email_exists(&self, email: &str, options: ResolveOptions) -> Result<bool> {
        self.exists(LookupKind::Email, email, options).await
    }

    /// Returns true if an address is registered.
    pub async fn is_address_exists(&self, address: &str, options: ResolveOptions) -> Result<bool> {
        self.exists(LookupKind::Address, address, options).await
    }

    /// Returns true if `key` resolves to an identity.
    ///
    /// With `cache_check_exists` on, a fresh cached record answers directly.
    /// Otherwise this is a full resolve under the resolve cache policy.
    #[instrument(skip(self))]
    pub async fn exists(&self, kind: LookupKind, key: &str, options: ResolveOptions) -> Result<bool> {
        let config = self.config();

        if config.cache_check_exists && !options.force_request {
            if let Some(record) = self.cached(kind, &cache_key(kind, key), &config) {
                return Ok(record.is_found());
            }
        }

        Ok(self.resolve(kind, key, options).await?.is_found())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SETTERS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Replaces the cache freshness window. `0` restores the default.
    pub fn set_cache_time(&self, ms: u64) {
        self.update(|config| config.cache_time_ms = normalize_cache_time(Some(ms)));
    }

    /// Enables or disables cached existence checks.
    pub fn set_cache_check_exists(&self, enabled: bool) {
        self.update(|config| config.cache_check_exists = enabled);
    }

    /// Enables or disables cached resolution.
    pub fn set_cache_resolve(&self, enabled: bool) {
        self.update(|config| config.cache_resolve = enabled);
    }

    /// Replaces the endpoint list with a single endpoint.
    pub fn set_rpc_url(&self, url: impl Into<String>) -> Result<()> {
        self.set_rpc_urls(vec![url.into()])
    }

    /// Replaces the endpoint list.
    pub fn set_rpc_urls(&self, urls: Vec<String>) -> Result<()> {
        let endpoints = validate_endpoints(urls)?;
        self.update(|config| config.endpoints = endpoints);
        Ok(())
    }

    /// Replaces the contract address.
    pub fn set_contract_address(&self, address: &str) -> Result<()> {
        let contract = Address::from_hex(address)?;
        self.update(|config| config.contract = contract);
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut ResolverConfig)) {
        let mut guard = self.config.write();
        let mut next = ResolverConfig::clone(&guard);
        apply(&mut next);
        *guard = Arc::new(next);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CACHE MANAGEMENT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Clears cached nickname lookups.
    pub fn clear_nickname_cache(&self) {
        self.cache.store(LookupKind::Nickname).clear_all();
    }

    /// Clears cached email lookups.
    pub fn clear_email_cache(&self) {
        self.cache.store(LookupKind::Email).clear_all();
    }

    /// Clears cached address lookups.
    pub fn clear_address_cache(&self) {
        self.cache.store(LookupKind::Address).clear_all();
    }

    /// Clears every cache.
    pub fn clear_all_cache(&self) {
        self.cache.clear_all();
    }

    /// Removes one cached nickname lookup.
    pub fn clear_nickname_cache_by_key(&self, nickname: &str) {
        self.clear_by_key(LookupKind::Nickname, nickname);
    }

    /// Removes one cached email lookup.
    pub fn clear_email_cache_by_key(&self, email: &str) {
        self.clear_by_key(LookupKind::Email, email);
    }

    /// Removes one cached address lookup.
    pub fn clear_address_cache_by_key(&self, address: &str) {
        self.clear_by_key(LookupKind::Address, address);
    }

    /// Removes one cached lookup of `kind`.
    pub fn clear_by_key(&self, kind: LookupKind, key: &str) {
        self.cache.store(kind).delete(&cache_key(kind, key));
    }

    /// Statistics for one kind's cache under the current freshness window.
    pub fn cache_stats(&self, kind: LookupKind) -> CacheStats {
        self.cache.store(kind).stats(self.clock.now(), self.config().ttl())
    }
}

/// The single call parameter for a lookup.
///
/// Address lookups classify the key by shape and accept only an address.
fn call_param(kind: LookupKind, key: &LookupKey) -> Result<AbiParam> {
    match kind {
        LookupKind::Address => match AbiParam::infer(key.as_str())? {
            param @ AbiParam::Address(_) => Ok(param),
            _ => Err(AddressBookError::InvalidAddress(format!(
                "'{key}' is not a 40 hex character address"
            ))),
        },
        LookupKind::Nickname | LookupKind::Email => Ok(AbiParam::String(key.as_str().to_string())),
    }
}

/// Cache key for a raw lookup input.
///
/// Addresses are keyed by their canonical `0x` form so every spelling of the
/// same address shares one slot. Anything else is lower-cased.
fn cache_key(kind: LookupKind, raw: &str) -> LookupKey {
    let key = LookupKey::new(raw);
    match kind {
        LookupKind::Address => match AbiParam::infer(key.as_str()) {
            Ok(AbiParam::Address(address)) => LookupKey::new(&address.to_hex_string()),
            _ => key,
        },
        LookupKind::Nickname | LookupKind::Email => key,
    }
}
