//! Schema-driven decoding of the identity tuple returned by every lookup.
//!
//! The return shape is declared once in [`IDENTITY_SCHEMA`]. The payload is
//! checked against the schema's head size before any slot is read, and every
//! offset/length pair is bounds-checked against the payload.

use addrbook_core::{Address, AddressBookError, IdentityInfo, Result, WORD_SIZE};

use crate::word::Word;

/// How a head slot is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// Raw 32-byte value
    Static32,
    /// Right-aligned 20-byte address
    StaticAddress,
    /// Byte offset to a `length ++ utf8` string
    DynamicString,
}

/// One head slot of a return schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSpec {
    /// Head slot index
    pub slot: usize,
    /// Interpretation
    pub kind: SlotKind,
}

const fn slot(slot: usize, kind: SlotKind) -> SlotSpec {
    SlotSpec { slot, kind }
}

/// Return shape shared by the three lookups:
/// `(tokenId, nickname, email, address, freeText, image)`.
pub const IDENTITY_SCHEMA: [SlotSpec; 6] = [
    slot(0, SlotKind::Static32),
    slot(1, SlotKind::DynamicString),
    slot(2, SlotKind::DynamicString),
    slot(3, SlotKind::StaticAddress),
    slot(4, SlotKind::DynamicString),
    slot(5, SlotKind::DynamicString),
];

/// A decoded slot value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiValue {
    /// From [`SlotKind::Static32`]
    Word(Word),
    /// From [`SlotKind::StaticAddress`]
    Address(Address),
    /// From [`SlotKind::DynamicString`]
    String(String),
}

impl AbiValue {
    fn into_word(self) -> Result<Word> {
        match self {
            AbiValue::Word(w) => Ok(w),
            other => Err(schema_mismatch("word", &other)),
        }
    }

    fn into_address(self) -> Result<Address> {
        match self {
            AbiValue::Address(a) => Ok(a),
            other => Err(schema_mismatch("address", &other)),
        }
    }

    fn into_string(self) -> Result<String> {
        match self {
            AbiValue::String(s) => Ok(s),
            other => Err(schema_mismatch("string", &other)),
        }
    }
}

fn schema_mismatch(expected: &str, got: &AbiValue) -> AddressBookError {
    AddressBookError::InternalError(format!("schema yielded {got:?}, expected {expected}"))
}

/// Decoded identity tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedIdentity {
    /// Registry token id; zero means "not registered"
    pub token_id: Word,
    /// Registered nickname
    pub nickname: String,
    /// Registered email
    pub email: String,
    /// Registered address
    pub address: Address,
    /// Free-form text
    pub free_text: String,
    /// Avatar / image reference
    pub image: String,
}

impl DecodedIdentity {
    /// A tuple describes a registered identity iff its token id is non-zero.
    pub fn is_registered(&self) -> bool {
        !self.token_id.is_zero()
    }

    /// Converts into the public identity payload.
    pub fn into_info(self) -> IdentityInfo {
        IdentityInfo {
            address: self.address,
            email: self.email,
            nickname: self.nickname,
            avatar: self.image,
            free_text: self.free_text,
        }
    }
}

/// Decodes `payload` according to `schema`, in schema order.
pub fn decode_with_schema(payload: &[u8], schema: &[SlotSpec]) -> Result<Vec<AbiValue>> {
    let head_len = schema
        .iter()
        .map(|s| (s.slot + 1) * WORD_SIZE)
        .max()
        .unwrap_or(0);

    if payload.len() < head_len {
        return Err(AddressBookError::MalformedResponse(format!(
            "payload is {} bytes, head needs {}",
            payload.len(),
            head_len
        )));
    }

    schema
        .iter()
        .map(|entry| {
            let head = Word::read(&payload[entry.slot * WORD_SIZE..]);
            match entry.kind {
                SlotKind::Static32 => Ok(AbiValue::Word(head)),
                SlotKind::StaticAddress => head.to_address().map(AbiValue::Address).ok_or_else(|| {
                    AddressBookError::MalformedResponse(format!(
                        "slot {} is not a right-aligned address",
                        entry.slot
                    ))
                }),
                SlotKind::DynamicString => read_string(payload, entry.slot, head).map(AbiValue::String),
            }
        })
        .collect()
}

/// Follows `pointer` to a `length ++ bytes` entry and decodes it as UTF-8.
fn read_string(payload: &[u8], slot: usize, pointer: Word) -> Result<String> {
    let out_of_range = |what: &str| {
        AddressBookError::MalformedResponse(format!(
            "slot {slot}: {what} past end of {} byte payload",
            payload.len()
        ))
    };

    let offset = pointer.to_usize().ok_or_else(|| out_of_range("offset"))?;
    let data_start = offset
        .checked_add(WORD_SIZE)
        .filter(|&end| end <= payload.len())
        .ok_or_else(|| out_of_range("length prefix"))?;

    let len = Word::read(&payload[offset..])
        .to_usize()
        .ok_or_else(|| out_of_range("length"))?;
    let data_end = data_start
        .checked_add(len)
        .filter(|&end| end <= payload.len())
        .ok_or_else(|| out_of_range("string data"))?;

    String::from_utf8(payload[data_start..data_end].to_vec()).map_err(|e| {
        AddressBookError::MalformedResponse(format!("slot {slot}: invalid UTF-8: {e}"))
    })
}

/// Decodes raw identity tuple bytes.
pub fn decode_identity_bytes(payload: &[u8]) -> Result<DecodedIdentity> {
    let values: [AbiValue; 6] = decode_with_schema(payload, &IDENTITY_SCHEMA)?
        .try_into()
        .map_err(|v: Vec<AbiValue>| {
            AddressBookError::InternalError(format!("schema yielded {} values", v.len()))
        })?;
    let [token_id, nickname, email, address, free_text, image] = values;

    Ok(DecodedIdentity {
        token_id: token_id.into_word()?,
        nickname: nickname.into_string()?,
        email: email.into_string()?,
        address: address.into_address()?,
        free_text: free_text.into_string()?,
        image: image.into_string()?,
    })
}

/// Decodes the hex `result` of an `eth_call` (with or without `0x`).
pub fn decode_identity(raw: &str) -> Result<DecodedIdentity> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    let payload = hex::decode(digits)
        .map_err(|e| AddressBookError::MalformedResponse(format!("result is not hex: {e}")))?;
    decode_identity_bytes(&payload)
}
