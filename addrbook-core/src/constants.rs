//! Constants for the address book contract and its default networks.
//!
//! Selectors are fixed 4-byte identifiers of the three lookup functions on the
//! address book contract. They are opaque and never derived at runtime.

// ═══════════════════════════════════════════════════════════════════════════════
// CONTRACT CALL LAYOUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a function selector in bytes.
pub const SELECTOR_SIZE: usize = 4;

/// Size of one calling-convention slot (word) in bytes.
pub const WORD_SIZE: usize = 32;

/// Size of an Ethereum address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Length of an address in hex characters, without the `0x` prefix.
pub const ADDRESS_HEX_LEN: usize = ADDRESS_SIZE * 2;

/// Selector of the lookup-by-nickname function.
pub const SELECTOR_BY_NICKNAME: [u8; SELECTOR_SIZE] = [0x14, 0x20, 0xeb, 0x16];

/// Selector of the lookup-by-email function.
pub const SELECTOR_BY_EMAIL: [u8; SELECTOR_SIZE] = [0x9e, 0xab, 0x70, 0xf9];

/// Selector of the lookup-by-address function.
pub const SELECTOR_BY_ADDRESS: [u8; SELECTOR_SIZE] = [0x0b, 0xdc, 0x37, 0xcd];

// ═══════════════════════════════════════════════════════════════════════════════
// NETWORKS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default Optimism mainnet RPC endpoints, in failover order.
pub const MAINNET_RPC_URLS: &[&str] = &[
    "https://optimism.llamarpc.com",
    "https://1rpc.io/op",
    "https://optimism.drpc.org",
];

/// Default Optimism Sepolia RPC endpoints, in failover order.
pub const TESTNET_RPC_URLS: &[&str] = &[
    "https://optimism-sepolia.blockpi.network/v1/rpc/public",
    "https://endpoints.omniatech.io/v1/op/sepolia/public",
    "https://sepolia.optimism.io",
];

/// Address book contract on mainnet.
pub const MAINNET_CONTRACT_ADDRESS: &str = "0x32b4aED2b805dAb72c4bAD5807fE8bBae2934fcd";

/// Address book contract on testnet.
pub const TESTNET_CONTRACT_ADDRESS: &str = "0x32b4aED2b805dAb72c4bAD5807fE8bBae2934fcd";

/// Block tag every `eth_call` is evaluated against.
pub const BLOCK_TAG_LATEST: &str = "latest";

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE & HTTP DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default freshness window of a cached record (5 minutes).
pub const DEFAULT_CACHE_TIME_MS: u64 = 5 * 60 * 1000;

/// Default HTTP request timeout.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints_are_https() {
        for url in MAINNET_RPC_URLS.iter().chain(TESTNET_RPC_URLS) {
            assert!(url.starts_with("https://"), "{url}");
        }
    }

    #[test]
    fn test_selectors_are_distinct() {
        assert_ne!(SELECTOR_BY_NICKNAME, SELECTOR_BY_EMAIL);
        assert_ne!(SELECTOR_BY_NICKNAME, SELECTOR_BY_ADDRESS);
        assert_ne!(SELECTOR_BY_EMAIL, SELECTOR_BY_ADDRESS);
    }

    #[test]
    fn test_contract_addresses_are_address_shaped() {
        for addr in [MAINNET_CONTRACT_ADDRESS, TESTNET_CONTRACT_ADDRESS] {
            let hex = addr.strip_prefix("0x").unwrap();
            assert_eq!(hex.len(), ADDRESS_HEX_LEN);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
