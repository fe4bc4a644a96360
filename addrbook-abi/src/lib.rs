//! # Address Book ABI Codec
//!
//! Hand-rolled encoder and decoder for the contract calling convention, limited
//! to the shapes the three lookup functions use: one string or address
//! parameter in, a fixed six-slot identity tuple out.
//!
//! ```rust
//! use addrbook_abi::{encode_call, AbiParam};
//! use addrbook_core::SELECTOR_BY_NICKNAME;
//!
//! let frame = encode_call(SELECTOR_BY_NICKNAME, &[AbiParam::String("alice".into())]);
//! assert_eq!(frame.len(), 4 + 32 + 64);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod decode;
mod encode;
mod word;

pub use decode::{
    decode_identity, decode_identity_bytes, decode_with_schema, AbiValue, DecodedIdentity,
    SlotKind, SlotSpec, IDENTITY_SCHEMA,
};
pub use encode::{encode_call, encode_call_hex, encode_params, AbiParam};
pub use word::Word;
