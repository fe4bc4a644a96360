//! 32-byte big-endian slot value.

use addrbook_core::{Address, ADDRESS_SIZE, WORD_SIZE};

/// One 32-byte calling-convention slot, interpreted as a big-endian unsigned
/// integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word([u8; WORD_SIZE]);

impl Word {
    /// The all-zero word.
    pub const ZERO: Word = Word([0u8; WORD_SIZE]);

    /// Creates from a fixed-size array.
    pub fn from_array(bytes: [u8; WORD_SIZE]) -> Self {
        Self(bytes)
    }

    /// Reads the word at `slice[..32]`. Caller guarantees the length.
    pub(crate) fn read(slice: &[u8]) -> Self {
        let mut bytes = [0u8; WORD_SIZE];
        bytes.copy_from_slice(&slice[..WORD_SIZE]);
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; WORD_SIZE] {
        &self.0
    }

    /// Returns true if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Value as `u128`, or `None` if it does not fit.
    pub fn to_u128(&self) -> Option<u128> {
        let (high, low) = self.0.split_at(WORD_SIZE - 16);
        if high.iter().any(|&b| b != 0) {
            return None;
        }
        let mut buf = [0u8; 16];
        buf.copy_from_slice(low);
        Some(u128::from_be_bytes(buf))
    }

    /// Value as `usize`, or `None` if it does not fit.
    pub fn to_usize(&self) -> Option<usize> {
        self.to_u128().and_then(|v| usize::try_from(v).ok())
    }

    /// Interprets the word as a right-aligned address. Returns `None` when the
    /// 12 padding bytes are not zero.
    pub fn to_address(&self) -> Option<Address> {
        let (padding, tail) = self.0.split_at(WORD_SIZE - ADDRESS_SIZE);
        if padding.iter().any(|&b| b != 0) {
            return None;
        }
        Address::from_bytes(tail).ok()
    }
}

impl From<u128> for Word {
    fn from(value: u128) -> Self {
        let mut bytes = [0u8; WORD_SIZE];
        bytes[WORD_SIZE - 16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        Self::from(u128::from(value))
    }
}

impl From<usize> for Word {
    fn from(value: usize) -> Self {
        Self::from(value as u128)
    }
}

impl From<Address> for Word {
    fn from(address: Address) -> Self {
        let mut bytes = [0u8; WORD_SIZE];
        bytes[WORD_SIZE - ADDRESS_SIZE..].copy_from_slice(address.as_bytes());
        Self(bytes)
    }
}

impl std::fmt::Debug for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Word(0x{})", hex::encode(self.0))
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_u128() {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "0x{}", hex::encode(self.0)),
        }
    }
}
