//! # Identity Module
//!
//! Textual encodings of keys. A user never sees 32 raw bytes; they see a
//! `G...` account ID or, if they are careless, an `S...` seed.
//!
//! 1. **Strkey**: versioned, CRC16-checked base-32. The current format for
//!    every key role.
//! 2. **Base58**: the legacy seed format. Read-only.

pub mod base58;
pub mod strkey;

pub use base58::Base58Error;
pub use strkey::{
    decode_check, decode_check_named, encode_check, encode_check_named, StrKeyError, VersionByte,
};
