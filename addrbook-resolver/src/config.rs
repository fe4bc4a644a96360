//! Resolver configuration.
//!
//! [`AddressBookOptions`] is what callers hand in: every field optional.
//! [`ResolverConfig`] is the merged, validated result the resolver runs on.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use addrbook_core::error::{AddressBookError, Result};
use addrbook_core::{
    Address, DEFAULT_CACHE_TIME_MS, MAINNET_CONTRACT_ADDRESS, MAINNET_RPC_URLS,
    TESTNET_CONTRACT_ADDRESS, TESTNET_RPC_URLS,
};

/// Cache policy options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheOptions {
    /// Freshness window in milliseconds (`0` or unset means the default)
    pub cache_time_ms: Option<u64>,
    /// Whether existence checks may answer from the cache
    pub cache_check_exists: Option<bool>,
    /// Whether resolve calls may answer from the cache
    pub cache_resolve: Option<bool>,
}

/// Construction-time options for an address book.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressBookOptions {
    /// RPC endpoints in failover order
    pub rpc_urls: Option<Vec<String>>,
    /// Address book contract
    pub contract_address: Option<String>,
    /// Use testnet defaults for anything not given explicitly
    pub is_testnet: bool,
    /// Cache policy
    pub cache: CacheOptions,
}

impl AddressBookOptions {
    /// Creates options that take every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches defaults to testnet.
    pub fn testnet(mut self) -> Self {
        self.is_testnet = true;
        self
    }

    /// Sets a single RPC endpoint.
    pub fn with_rpc_url(self, url: impl Into<String>) -> Self {
        self.with_rpc_urls(vec![url.into()])
    }

    /// Sets the RPC endpoint list.
    pub fn with_rpc_urls(mut self, urls: Vec<String>) -> Self {
        self.rpc_urls = Some(urls);
        self
    }

    /// Sets the contract address.
    pub fn with_contract_address(mut self, address: impl Into<String>) -> Self {
        self.contract_address = Some(address.into());
        self
    }

    /// Sets the cache freshness window.
    pub fn with_cache_time_ms(mut self, ms: u64) -> Self {
        self.cache.cache_time_ms = Some(ms);
        self
    }

    /// Lets existence checks answer from the cache.
    pub fn with_cache_check_exists(mut self, enabled: bool) -> Self {
        self.cache.cache_check_exists = Some(enabled);
        self
    }

    /// Lets resolve calls answer from the cache.
    pub fn with_cache_resolve(mut self, enabled: bool) -> Self {
        self.cache.cache_resolve = Some(enabled);
        self
    }
}

/// Merged resolver configuration. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// RPC endpoints in failover order, never empty
    pub endpoints: Vec<String>,
    /// Address book contract
    pub contract: Address,
    /// Freshness window in milliseconds, never zero
    pub cache_time_ms: u64,
    /// Whether existence checks may answer from the cache
    pub cache_check_exists: bool,
    /// Whether resolve calls may answer from the cache
    pub cache_resolve: bool,
}

impl ResolverConfig {
    /// Merges `options` against the network defaults and validates the result.
    pub fn from_options(options: &AddressBookOptions) -> Result<Self> {
        let endpoints = match &options.rpc_urls {
            Some(urls) => urls.clone(),
            None if options.is_testnet => to_owned(TESTNET_RPC_URLS),
            None => to_owned(MAINNET_RPC_URLS),
        };

        let contract = match &options.contract_address {
            Some(address) => address.as_str(),
            None if options.is_testnet => TESTNET_CONTRACT_ADDRESS,
            None => MAINNET_CONTRACT_ADDRESS,
        };

        Ok(Self {
            endpoints: validate_endpoints(endpoints)?,
            contract: Address::from_hex(contract)?,
            cache_time_ms: normalize_cache_time(options.cache.cache_time_ms),
            cache_check_exists: options.cache.cache_check_exists.unwrap_or(false),
            cache_resolve: options.cache.cache_resolve.unwrap_or(false),
        })
    }

    /// Freshness window as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.cache_time_ms).unwrap_or(i64::MAX))
    }
}

/// Zero and unset both mean the default window.
pub(crate) fn normalize_cache_time(ms: Option<u64>) -> u64 {
    match ms {
        Some(ms) if ms > 0 => ms,
        _ => DEFAULT_CACHE_TIME_MS,
    }
}

/// Every endpoint must be an absolute http(s) URL, and there must be at least one.
pub(crate) fn validate_endpoints(endpoints: Vec<String>) -> Result<Vec<String>> {
    if endpoints.is_empty() {
        return Err(AddressBookError::ConfigError(
            "at least one RPC endpoint is required".into(),
        ));
    }

    for endpoint in &endpoints {
        let parsed = url::Url::parse(endpoint)
            .map_err(|e| AddressBookError::ConfigError(format!("invalid RPC URL '{endpoint}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AddressBookError::ConfigError(format!(
                "RPC URL '{endpoint}' must use http or https"
            )));
        }
    }

    Ok(endpoints)
}

fn to_owned(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_defaults_are_mainnet() {
        let config = ResolverConfig::from_options(&AddressBookOptions::new()).unwrap();

        assert_eq!(config.endpoints, to_owned(MAINNET_RPC_URLS));
        assert_eq!(config.contract, Address::from_hex(MAINNET_CONTRACT_ADDRESS).unwrap());
        assert_eq!(config.cache_time_ms, 300_000);
        assert!(!config.cache_check_exists);
        assert!(!config.cache_resolve);
        assert_eq!(config.ttl(), Duration::minutes(5));
    }

    #[test]
    fn test_testnet_switches_defaults() {
        let config = ResolverConfig::from_options(&AddressBookOptions::new().testnet()).unwrap();

        assert_eq!(config.endpoints, to_owned(TESTNET_RPC_URLS));
        assert_eq!(config.contract, Address::from_hex(TESTNET_CONTRACT_ADDRESS).unwrap());
    }

    #[test]
    fn test_explicit_values_win_over_testnet() {
        let options = AddressBookOptions::new()
            .testnet()
            .with_rpc_url("http://localhost:8545")
            .with_contract_address(format!("0x{}", "11".repeat(20)))
            .with_cache_time_ms(1_000)
            .with_cache_check_exists(true)
            .with_cache_resolve(true);

        let config = ResolverConfig::from_options(&options).unwrap();

        assert_eq!(config.endpoints, vec!["http://localhost:8545".to_string()]);
        assert_eq!(config.contract, Address::from_array([0x11; 20]));
        assert_eq!(config.cache_time_ms, 1_000);
        assert!(config.cache_check_exists);
        assert!(config.cache_resolve);
    }

    #[test_case(None, 300_000 ; "unset")]
    #[test_case(Some(0), 300_000 ; "zero")]
    #[test_case(Some(1), 1 ; "one")]
    #[test_case(Some(60_000), 60_000 ; "one minute")]
    fn test_cache_time_normalization(ms: Option<u64>, expected: u64) {
        assert_eq!(normalize_cache_time(ms), expected);
    }

    #[test_case("not a url" ; "garbage")]
    #[test_case("ftp://rpc.example" ; "wrong scheme")]
    #[test_case("/relative/path" ; "relative")]
    fn test_invalid_endpoint_rejected(url: &str) {
        let err = ResolverConfig::from_options(&AddressBookOptions::new().with_rpc_url(url)).unwrap_err();
        assert!(matches!(err, AddressBookError::ConfigError(_)), "{err}");
    }

    #[test]
    fn test_empty_endpoint_list_rejected() {
        let err = ResolverConfig::from_options(&AddressBookOptions::new().with_rpc_urls(vec![])).unwrap_err();
        assert!(matches!(err, AddressBookError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_contract_rejected() {
        let err = ResolverConfig::from_options(&AddressBookOptions::new().with_contract_address("0x1234"))
            .unwrap_err();
        assert!(matches!(err, AddressBookError::InvalidAddress(_)));
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let options: AddressBookOptions = serde_json::from_str(
            r#"{"rpcUrls": ["https://rpc.example"], "isTestnet": true, "cache": {"cacheTimeMs": 10, "cacheResolve": true}}"#,
        )
        .unwrap();

        assert_eq!(options.rpc_urls, Some(vec!["https://rpc.example".to_string()]));
        assert!(options.is_testnet);
        assert_eq!(options.cache.cache_time_ms, Some(10));
        assert_eq!(options.cache.cache_resolve, Some(true));
        assert_eq!(options.cache.cache_check_exists, None);
        assert_eq!(options.contract_address, None);
    }

    #[test]
    fn test_empty_options_deserialize() {
        let options: AddressBookOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, AddressBookOptions::default());
    }
}
