//! # Cryptographic Primitives
//!
//! Every hash, checksum, signature and keypair in the crate flows through
//! here.
//!
//! We deliberately chose boring, well-audited cryptography:
//!
//! - **Ed25519** for signatures, via `ed25519-dalek`.
//! - **SHA-256** for network IDs and the legacy seed checksum.
//! - **CRC16/XModem** for strkey typo detection (not a security primitive).
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Everything here is a thin, type-safe wrapper around audited
//! implementations.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{crc16_checksum, double_sha256, sha256};
pub use keys::{KeyError, Keypair};
pub use signatures::{default_provider, verify_detached, Ed25519Provider, SigningProvider};
