//! Call-frame encoding: `selector ++ head ++ tail`.
//!
//! Static values (numbers, addresses) sit directly in their 32-byte head slot.
//! A dynamic string puts a byte offset in its head slot, measured from the start
//! of the parameter block, and its `length ++ utf8 bytes ++ zero padding` in
//! the tail.

use addrbook_core::{Address, Result, ADDRESS_HEX_LEN, SELECTOR_SIZE, WORD_SIZE};

use crate::word::Word;

/// One call parameter, classified by shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiParam {
    /// Unsigned 256-bit integer (static)
    Uint(Word),
    /// 20-byte address, left-padded (static)
    Address(Address),
    /// UTF-8 string (dynamic)
    String(String),
}

impl AbiParam {
    /// Classifies a raw string parameter by shape.
    ///
    /// A `0x`-prefixed 42-character string must be a valid address and fails
    /// with `InvalidAddress` otherwise. A bare 40-character hex string is an
    /// address. Anything else is a dynamic string.
    pub fn infer(raw: &str) -> Result<Self> {
        let prefixed = raw.starts_with("0x") || raw.starts_with("0X");
        if prefixed && raw.len() == ADDRESS_HEX_LEN + 2 {
            return Address::from_hex(raw).map(AbiParam::Address);
        }
        if raw.len() == ADDRESS_HEX_LEN && raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Address::from_hex(raw).map(AbiParam::Address);
        }
        Ok(AbiParam::String(raw.to_string()))
    }

    /// Returns true if the value lives in the tail segment.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, AbiParam::String(_))
    }
}

impl From<u64> for AbiParam {
    fn from(value: u64) -> Self {
        AbiParam::Uint(Word::from(value))
    }
}

impl From<Address> for AbiParam {
    fn from(address: Address) -> Self {
        AbiParam::Address(address)
    }
}

/// Encodes the parameter block (`head ++ tail`) without a selector.
///
/// The same layout is used for return tuples, so this also builds contract
/// responses for tests and tooling.
pub fn encode_params(params: &[AbiParam]) -> Vec<u8> {
    let head_len = params.len() * WORD_SIZE;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for param in params {
        let slot = match param {
            AbiParam::Uint(word) => *word,
            AbiParam::Address(address) => Word::from(*address),
            AbiParam::String(s) => {
                let offset = head_len + tail.len();
                append_dynamic_bytes(&mut tail, s.as_bytes());
                Word::from(offset)
            }
        };
        head.extend_from_slice(slot.as_bytes());
    }

    head.extend_from_slice(&tail);
    head
}

/// Encodes a full call frame: `selector ++ head ++ tail`.
pub fn encode_call(selector: [u8; SELECTOR_SIZE], params: &[AbiParam]) -> Vec<u8> {
    let body = encode_params(params);
    let mut frame = Vec::with_capacity(SELECTOR_SIZE + body.len());
    frame.extend_from_slice(&selector);
    frame.extend_from_slice(&body);
    frame
}

/// Encodes a call frame as the `0x`-prefixed hex string `eth_call` expects.
pub fn encode_call_hex(selector: [u8; SELECTOR_SIZE], params: &[AbiParam]) -> String {
    format!("0x{}", hex::encode(encode_call(selector, params)))
}

/// Appends `length ++ bytes ++ zero padding to a word boundary`.
fn append_dynamic_bytes(tail: &mut Vec<u8>, bytes: &[u8]) {
    tail.extend_from_slice(Word::from(bytes.len()).as_bytes());
    tail.extend_from_slice(bytes);
    let padded = bytes.len().div_ceil(WORD_SIZE) * WORD_SIZE;
    tail.resize(tail.len() + (padded - bytes.len()), 0);
}
