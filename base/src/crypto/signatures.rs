//! # Signing Provider
//!
//! Every key derivation, signature and verification in the crate goes
//! through a [`SigningProvider`]. There is one implementation,
//! [`Ed25519Provider`], wrapping `ed25519-dalek` and the OS RNG. It is picked
//! at compile time by [`default_provider`]; there is no runtime probing for
//! native backends.
//!
//! Keeping the seam as a trait gives us:
//!
//! 1. A single place to audit all signing operations.
//! 2. A way to plug in an HSM or a test double without touching `Keypair`.
//!
//! ## Verification never panics
//!
//! Bad public key bytes, a signature of the wrong length, or a signature
//! that simply does not check out all collapse into `false`. Callers that
//! care why should not be verifying untrusted input in the first place.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::config::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH, SIGNATURE_LENGTH};

/// The cryptographic capabilities the key layer depends on.
pub trait SigningProvider: Send + Sync {
    /// Derive the public key for a 32-byte seed.
    fn derive_public_key(&self, seed: &[u8; SEED_LENGTH]) -> [u8; PUBLIC_KEY_LENGTH];

    /// Sign `message` with a 64-byte `seed || public_key` secret key.
    fn sign(&self, secret_key: &[u8; SECRET_KEY_LENGTH], message: &[u8]) -> [u8; SIGNATURE_LENGTH];

    /// Check `signature` over `message` against `public_key`.
    fn verify(&self, public_key: &[u8; PUBLIC_KEY_LENGTH], message: &[u8], signature: &[u8]) -> bool;

    /// Fill `dest` with cryptographically secure random bytes.
    fn random_bytes(&self, dest: &mut [u8]);
}

/// Ed25519 over `ed25519-dalek`.
///
/// Signatures are deterministic (RFC 8032): the same key and message always
/// give the same 64 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Provider;

impl SigningProvider for Ed25519Provider {
    fn derive_public_key(&self, seed: &[u8; SEED_LENGTH]) -> [u8; PUBLIC_KEY_LENGTH] {
        SigningKey::from_bytes(seed).verifying_key().to_bytes()
    }

    fn sign(&self, secret_key: &[u8; SECRET_KEY_LENGTH], message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        // The public half is re-derived from the seed; the stored copy is
        // only there for callers that expect the 64-byte layout.
        let mut seed = [0u8; SEED_LENGTH];
        seed.copy_from_slice(&secret_key[..SEED_LENGTH]);
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        signing_key.sign(message).to_bytes()
    }

    fn verify(&self, public_key: &[u8; PUBLIC_KEY_LENGTH], message: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        verifying_key.verify(message, &signature).is_ok()
    }

    fn random_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

static DEFAULT_PROVIDER: Ed25519Provider = Ed25519Provider;

/// The provider used by [`crate::crypto::keys::Keypair`].
pub fn default_provider() -> &'static dyn SigningProvider {
    &DEFAULT_PROVIDER
}

/// Verify a detached signature over raw key bytes with the default provider.
///
/// This is the "I got these bytes off the wire" variant: no keypair needed.
pub fn verify_detached(public_key: &[u8; PUBLIC_KEY_LENGTH], message: &[u8], signature: &[u8]) -> bool {
    default_provider().verify(public_key, message, signature)
}
