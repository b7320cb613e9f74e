//! # Strkey: Versioned Key Text
//!
//! A strkey is the human-facing representation of a key. Every account ID a
//! user pastes into a payment form and every seed they (hopefully) store
//! offline goes through this codec:
//!
//! ```text
//! version_byte (1) || data (n)
//!     -> crc16_xmodem(version_byte || data), little-endian (2)
//!     -> base32(version_byte || data || crc) -> GDLVVGAB...
//! ```
//!
//! The version byte is chosen so that the first base-32 character tells the
//! reader what they are looking at: `G` for an account, `S` for a seed.
//!
//! Decoding is strict. A string must decode, carry the expected version
//! byte, checksum correctly, and re-encode to exactly the same text.
//! Anything else is rejected.

use data_encoding::BASE32_NOPAD;
use std::fmt;
use thiserror::Error;
use tracing::trace;

use crate::config::{PUBLIC_KEY_LENGTH, SEED_LENGTH};
use crate::crypto::hash::crc16_checksum;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while encoding or decoding a strkey.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrKeyError {
    /// The decoded payload is too short to hold a version byte and checksum.
    #[error("invalid strkey input: {0}")]
    InvalidInput(String),

    /// The version byte does not match the requested role.
    #[error("invalid version byte: expected {expected} (0x{:02x}), got 0x{got:02x}", .expected.byte())]
    InvalidRole {
        /// The role the caller asked for.
        expected: VersionByte,
        /// The version byte actually found in the payload.
        got: u8,
    },

    /// The role name is not one of the known version-byte names.
    #[error("unknown strkey role '{0}'")]
    UnknownRole(String),

    /// The text is not valid base-32, or does not round-trip exactly.
    #[error("strkey is not canonically base32-encoded")]
    NonCanonicalEncoding,

    /// The CRC16 checksum does not match the payload.
    #[error("strkey checksum mismatch")]
    ChecksumMismatch,

    /// The data section has an unexpected length for this kind of key.
    #[error("invalid strkey data length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// Version bytes
// ---------------------------------------------------------------------------

/// The closed set of strkey roles and their version bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionByte {
    /// Ed25519 public key, `G...`.
    AccountId,
    /// Ed25519 secret seed, `S...`.
    Seed,
    /// Master private key, `M...`.
    MasterPrivate,
    /// Master public key, `P...`.
    MasterPublic,
    /// Private wallet key, `W...`.
    PrivateWallet,
    /// Public wallet key, `Z...`.
    PublicWallet,
    /// Hierarchical derivation key, `K...`.
    Hdk,
}

impl VersionByte {
    /// Every role, in table order.
    pub const ALL: [VersionByte; 7] = [
        VersionByte::AccountId,
        VersionByte::Seed,
        VersionByte::MasterPrivate,
        VersionByte::MasterPublic,
        VersionByte::PrivateWallet,
        VersionByte::PublicWallet,
        VersionByte::Hdk,
    ];

    /// The raw version byte prepended to the payload.
    pub const fn byte(self) -> u8 {
        match self {
            VersionByte::AccountId => 0x30,
            VersionByte::Seed => 0x90,
            VersionByte::MasterPrivate => 0x60,
            VersionByte::MasterPublic => 0x78,
            VersionByte::PrivateWallet => 0xb0,
            VersionByte::PublicWallet => 0xc8,
            VersionByte::Hdk => 0x50,
        }
    }

    /// The textual role name used by callers that select roles dynamically.
    pub const fn name(self) -> &'static str {
        match self {
            VersionByte::AccountId => "accountId",
            VersionByte::Seed => "seed",
            VersionByte::MasterPrivate => "mpriv",
            VersionByte::MasterPublic => "mpub",
            VersionByte::PrivateWallet => "privWallet",
            VersionByte::PublicWallet => "pubWallet",
            VersionByte::Hdk => "hdk",
        }
    }

    /// Look up a role by name.
    pub fn from_name(name: &str) -> Result<Self, StrKeyError> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| StrKeyError::UnknownRole(name.to_string()))
    }

    /// Look up a role by its raw byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.byte() == byte)
    }
}

impl fmt::Display for VersionByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// Encode `data` under `role`. Never fails; `data` may be empty.
///
/// ```
/// use ledger_base::identity::strkey::{encode_check, VersionByte};
///
/// let text = encode_check(VersionByte::AccountId, &[0u8; 32]);
/// assert!(text.starts_with('G'));
/// ```
pub fn encode_check(role: VersionByte, data: &[u8]) -> String {
    let mut payload = Vec::with_capacity(data.len() + 3);
    payload.push(role.byte());
    payload.extend_from_slice(data);
    let checksum = crc16_checksum(&payload);
    payload.extend_from_slice(&checksum);
    BASE32_NOPAD.encode(&payload)
}

/// [`encode_check`] with the role given by name.
pub fn encode_check_named(name: &str, data: &[u8]) -> Result<String, StrKeyError> {
    Ok(encode_check(VersionByte::from_name(name)?, data))
}

/// Decode `encoded`, requiring it to carry `role`. Returns the data bytes.
pub fn decode_check(role: VersionByte, encoded: &str) -> Result<Vec<u8>, StrKeyError> {
    let decoded = decode_canonical(encoded)?;

    if decoded.len() < 3 {
        return Err(StrKeyError::InvalidInput(format!(
            "decoded payload is {} bytes, need at least 3",
            decoded.len()
        )));
    }

    let version = decoded[0];
    if version != role.byte() {
        return Err(StrKeyError::InvalidRole {
            expected: role,
            got: version,
        });
    }

    let (payload, checksum) = decoded.split_at(decoded.len() - 2);
    if crc16_checksum(payload) != checksum {
        return Err(StrKeyError::ChecksumMismatch);
    }

    trace!(role = %role, len = payload.len() - 1, "strkey decoded");
    Ok(payload[1..].to_vec())
}

/// [`decode_check`] with the role given by name.
pub fn decode_check_named(name: &str, encoded: &str) -> Result<Vec<u8>, StrKeyError> {
    decode_check(VersionByte::from_name(name)?, encoded)
}

/// Identify which role a strkey carries, if it is well formed.
///
/// Returns the role and the data bytes. Used by tooling that receives
/// arbitrary key text and has to report what it is.
pub fn detect(encoded: &str) -> Option<(VersionByte, Vec<u8>)> {
    let decoded = decode_canonical(encoded).ok()?;
    let role = VersionByte::from_byte(*decoded.first()?)?;
    decode_check(role, encoded).ok().map(|data| (role, data))
}

/// Base-32 decode, then make sure re-encoding gives back the same text.
fn decode_canonical(encoded: &str) -> Result<Vec<u8>, StrKeyError> {
    let decoded = BASE32_NOPAD
        .decode(encoded.as_bytes())
        .map_err(|_| StrKeyError::NonCanonicalEncoding)?;
    if BASE32_NOPAD.encode(&decoded) != encoded {
        return Err(StrKeyError::NonCanonicalEncoding);
    }
    Ok(decoded)
}

// ---------------------------------------------------------------------------
// Ed25519 convenience helpers
// ---------------------------------------------------------------------------

/// `G...` text for a raw public key.
pub fn encode_account_id(public_key: &[u8; PUBLIC_KEY_LENGTH]) -> String {
    encode_check(VersionByte::AccountId, public_key)
}

/// Decode a `G...` account ID into its 32 raw bytes.
pub fn decode_account_id(encoded: &str) -> Result<[u8; PUBLIC_KEY_LENGTH], StrKeyError> {
    fixed(decode_check(VersionByte::AccountId, encoded)?)
}

/// `S...` text for a raw seed.
pub fn encode_seed(seed: &[u8; SEED_LENGTH]) -> String {
    encode_check(VersionByte::Seed, seed)
}

/// Decode an `S...` seed into its 32 raw bytes.
pub fn decode_seed(encoded: &str) -> Result<[u8; SEED_LENGTH], StrKeyError> {
    fixed(decode_check(VersionByte::Seed, encoded)?)
}

fn fixed<const N: usize>(data: Vec<u8>) -> Result<[u8; N], StrKeyError> {
    let got = data.len();
    data.try_into()
        .map_err(|_| StrKeyError::InvalidLength { expected: N, got })
}
