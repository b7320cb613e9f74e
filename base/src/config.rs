//! # Protocol Configuration & Constants
//!
//! Every fixed number the transaction core depends on lives here: scale
//! factors, key and field lengths, limits, and network passphrases.
//!
//! These values are part of the wire contract with the network. Changing
//! them does not change the network, it just makes us produce operations
//! that validators reject.

use sha2::{Digest, Sha256};
use std::fmt;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Passphrase of the public production network.
pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the public test network.
pub const TESTNET_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Number of smallest units in one whole unit. Seven decimal digits.
pub const ONE: i64 = 10_000_000;

/// Maximum number of fractional digits an amount may carry.
pub const AMOUNT_DECIMAL_PLACES: u32 = 7;

/// Largest representable amount in network units (`i64::MAX`).
pub const MAX_INT64: i64 = i64::MAX;

/// `MAX_INT64` rendered as a decimal amount. This is the default trust line
/// limit.
pub const MAX_INT64_AMOUNT: &str = "922337203685.4775807";

/// Prices are `int32` numerator/denominator pairs.
pub const MAX_PRICE_TERM: i64 = i32::MAX as i64;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 seed length in bytes.
pub const SEED_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Expanded secret key length (`seed || public_key`).
pub const SECRET_KEY_LENGTH: usize = 64;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Signature hints are the trailing 4 bytes of the encoded account ID.
pub const SIGNATURE_HINT_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// Operation Limits
// ---------------------------------------------------------------------------

/// Longest asset code the network accepts.
pub const MAX_ASSET_CODE_LENGTH: usize = 12;

/// Asset codes up to this length use the 4-byte variant.
pub const ALPHANUM4_CODE_LENGTH: usize = 4;

/// Maximum data entry name length (characters).
pub const MAX_DATA_NAME_LENGTH: usize = 64;

/// Maximum data entry value length (bytes).
pub const MAX_DATA_VALUE_LENGTH: usize = 64;

/// Maximum home domain length (bytes).
pub const MAX_HOME_DOMAIN_LENGTH: usize = 32;

/// Maximum number of intermediate assets in a path payment.
pub const MAX_PATH_LENGTH: usize = 5;

/// Signer weights and account thresholds are single bytes on the ledger.
pub const MAX_WEIGHT: u32 = 255;

/// Sentinel meaning "no limit" in administrative account limits.
pub const NO_LIMIT: &str = "-1";

/// Code reported for the native asset.
pub const NATIVE_ASSET_CODE: &str = "XLM";

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// The network a keypair or transaction is bound to.
///
/// A network is identified by its passphrase; the 32-byte network ID is the
/// SHA-256 of that passphrase. The ID doubles as the seed of the network's
/// master keypair (see [`crate::crypto::keys::Keypair::master`]).
///
/// There is deliberately no process-wide "current network". Pass the one
/// you mean.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Network {
    passphrase: String,
}

impl Network {
    /// A network with an arbitrary passphrase (private deployments).
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// The public production network.
    pub fn public() -> Self {
        Self::new(PUBLIC_NETWORK_PASSPHRASE)
    }

    /// The public test network.
    pub fn testnet() -> Self {
        Self::new(TESTNET_NETWORK_PASSPHRASE)
    }

    /// Resolve a friendly network name (`public`, `testnet`) or fall back
    /// to treating the input as a raw passphrase.
    pub fn from_name_or_passphrase(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "public" | "mainnet" => Self::public(),
            "testnet" | "test" => Self::testnet(),
            _ => Self::new(value),
        }
    }

    /// The passphrase this network was created from.
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// `sha256(passphrase)`.
    pub fn network_id(&self) -> [u8; 32] {
        let digest = Sha256::digest(self.passphrase.as_bytes());
        let mut id = [0u8; 32];
        id.copy_from_slice(&digest);
        id
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Network({:?})", self.passphrase)
    }
}
