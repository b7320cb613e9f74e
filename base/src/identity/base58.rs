//! # Legacy Base58 Seeds
//!
//! Before strkeys, seeds were written in base58 with a custom alphabet, a
//! one-byte version prefix and a 4-byte double-SHA-256 checksum:
//!
//! ```text
//! base58(version || data || sha256(sha256(version || data))[..4])
//! ```
//!
//! This format is deprecated. We still read it so old wallets can be
//! imported, but nothing in the crate issues new keys in it.

use bs58::Alphabet;
use thiserror::Error;
use tracing::warn;

use crate::config::SEED_LENGTH;
use crate::crypto::hash::double_sha256;

/// The legacy base58 alphabet.
pub const ALPHABET: Alphabet =
    Alphabet::new_unwrap(b"gsphnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCr65jkm8oFqi1tuvAxyz");

/// Version byte of a legacy account ID.
pub const ACCOUNT_ID_VERSION: u8 = 0x00;

/// Version byte of a legacy seed.
pub const SEED_VERSION: u8 = 0x21;

const CHECKSUM_LENGTH: usize = 4;

/// Errors from the legacy base58 codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("invalid base58 encoding")]
    InvalidEncoding,

    #[error("invalid base58 version byte: expected 0x{expected:02x}, got 0x{got:02x}")]
    InvalidRole { expected: u8, got: u8 },

    #[error("base58 checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid base58 data length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// Decode a legacy payload carrying `version`. Returns the data bytes.
pub fn decode_check(version: u8, encoded: &str) -> Result<Vec<u8>, Base58Error> {
    let decoded = bs58::decode(encoded)
        .with_alphabet(&ALPHABET)
        .into_vec()
        .map_err(|_| Base58Error::InvalidEncoding)?;

    if decoded.len() < 1 + CHECKSUM_LENGTH {
        return Err(Base58Error::InvalidEncoding);
    }
    if decoded[0] != version {
        return Err(Base58Error::InvalidRole {
            expected: version,
            got: decoded[0],
        });
    }

    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LENGTH);
    if double_sha256(payload)[..CHECKSUM_LENGTH] != *checksum {
        return Err(Base58Error::ChecksumMismatch);
    }
    Ok(payload[1..].to_vec())
}

/// Encode `data` in the legacy format. Only tests and migration tooling
/// should need this.
pub fn encode_check(version: u8, data: &[u8]) -> String {
    let mut payload = Vec::with_capacity(data.len() + 1 + CHECKSUM_LENGTH);
    payload.push(version);
    payload.extend_from_slice(data);
    let checksum = double_sha256(&payload);
    payload.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
    bs58::encode(payload).with_alphabet(&ALPHABET).into_string()
}

/// Decode a legacy base58 seed into its 32 raw bytes.
pub fn decode_seed(encoded: &str) -> Result<[u8; SEED_LENGTH], Base58Error> {
    warn!("decoding deprecated base58 seed");
    let data = decode_check(SEED_VERSION, encoded)?;
    let got = data.len();
    data.try_into().map_err(|_| Base58Error::InvalidLength {
        expected: SEED_LENGTH,
        got,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_HEX: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const LEGACY_SEED: &str = "s3L1v2VX4KVvxZLRWVhj79x6HssSMAkcsQSYTTw66aM2bvVWdoB";
    const LEGACY_ACCOUNT: &str = "gsdqv6eyJXzNYFyACm3rfT16zLb2XWTAHKQPk6hiYXpDbgzSM18";

    #[test]
    fn decodes_known_seed() {
        assert_eq!(hex::encode(decode_seed(LEGACY_SEED).unwrap()), SEED_HEX);
    }

    #[test]
    fn encoder_reproduces_known_text() {
        let seed = hex::decode(SEED_HEX).unwrap();
        assert_eq!(encode_check(SEED_VERSION, &seed), LEGACY_SEED);
    }

    #[test]
    fn account_id_is_not_a_seed() {
        assert_eq!(
            decode_seed(LEGACY_ACCOUNT),
            Err(Base58Error::InvalidRole {
                expected: SEED_VERSION,
                got: ACCOUNT_ID_VERSION
            })
        );
        assert_eq!(decode_check(ACCOUNT_ID_VERSION, LEGACY_ACCOUNT).unwrap().len(), 32);
    }

    #[test]
    fn checksum_is_verified() {
        let seed = hex::decode(SEED_HEX).unwrap();
        let mut raw = vec![SEED_VERSION];
        raw.extend_from_slice(&seed);
        raw.extend_from_slice(&[0, 0, 0, 0]);
        let forged = bs58::encode(raw).with_alphabet(&ALPHABET).into_string();
        assert_eq!(decode_seed(&forged), Err(Base58Error::ChecksumMismatch));
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        // '0' and 'l' are not in the alphabet.
        assert_eq!(decode_seed("s0l"), Err(Base58Error::InvalidEncoding));
    }

    #[test]
    fn short_seed_is_invalid_length() {
        let text = encode_check(SEED_VERSION, &[1u8; 16]);
        assert_eq!(
            decode_seed(&text),
            Err(Base58Error::InvalidLength {
                expected: 32,
                got: 16
            })
        );
    }
}
