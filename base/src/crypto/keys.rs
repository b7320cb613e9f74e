//! # Key Management
//!
//! A [`Keypair`] is a public key plus, optionally, the secret material that
//! can sign for it. Public-only keypairs come from account IDs; signing
//! keypairs come from seeds.
//!
//! ## Security considerations
//!
//! - The seed and 64-byte secret key live in `Zeroizing` buffers and are
//!   wiped on drop.
//! - Secrets are only ever lent out immutably.
//! - `Debug` prints the account ID and nothing else. Logging in this module
//!   records account IDs only, never seed or secret key bytes.

use std::fmt;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::{
    Network, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH, SIGNATURE_HINT_LENGTH,
};
use crate::crypto::signatures::default_provider;
use crate::identity::base58::{self, Base58Error};
use crate::identity::strkey::{self, StrKeyError};
use crate::xdr::{AccountId, DecoratedSignature, PublicKey};

/// Errors that can occur during key operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error(transparent)]
    StrKey(#[from] StrKeyError),

    #[error(transparent)]
    Base58(#[from] Base58Error),

    #[error("no secret key available: this keypair can only verify")]
    NoSecretKey,

    #[error("invalid public key: expected 32 bytes, got {0}")]
    InvalidPublicKey(usize),
}

/// Seed and expanded secret key. Always present together.
#[derive(Clone)]
struct SecretMaterial {
    seed: Zeroizing<[u8; SEED_LENGTH]>,
    secret_key: Zeroizing<[u8; SECRET_KEY_LENGTH]>,
}

/// An Ed25519 keypair, possibly public-only.
///
/// # Examples
///
/// ```
/// use ledger_base::crypto::keys::Keypair;
///
/// let kp = Keypair::random();
/// let sig = kp.sign(b"pay 10 to bob").unwrap();
/// assert!(kp.verify(b"pay 10 to bob", &sig));
///
/// let watcher = Keypair::from_account_id(&kp.account_id()).unwrap();
/// assert!(watcher.verify(b"pay 10 to bob", &sig));
/// assert!(watcher.sign(b"anything").is_err());
/// ```
#[derive(Clone)]
pub struct Keypair {
    public_key: [u8; PUBLIC_KEY_LENGTH],
    secret: Option<SecretMaterial>,
}

impl Keypair {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Build a signing keypair from a raw 32-byte seed.
    pub fn from_raw_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        let public_key = default_provider().derive_public_key(seed);

        let mut secret_key = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        secret_key[..SEED_LENGTH].copy_from_slice(seed);
        secret_key[SEED_LENGTH..].copy_from_slice(&public_key);

        Self {
            public_key,
            secret: Some(SecretMaterial {
                seed: Zeroizing::new(*seed),
                secret_key,
            }),
        }
    }

    /// Build a signing keypair from an `S...` seed.
    pub fn from_seed(seed: &str) -> Result<Self, KeyError> {
        let raw = Zeroizing::new(strkey::decode_seed(seed)?);
        Ok(Self::from_raw_seed(&raw))
    }

    /// Build a signing keypair from a deprecated base58 seed.
    #[deprecated(note = "base58 seeds are a legacy format; use strkey seeds")]
    pub fn from_base58_seed(seed: &str) -> Result<Self, KeyError> {
        let raw = Zeroizing::new(base58::decode_seed(seed)?);
        Ok(Self::from_raw_seed(&raw))
    }

    /// Build a public-only keypair from a `G...` account ID.
    pub fn from_account_id(account_id: &str) -> Result<Self, KeyError> {
        let public_key = strkey::decode_account_id(account_id)?;
        Ok(Self::from_public_key(&public_key))
    }

    /// Build a public-only keypair from raw key bytes.
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self {
            public_key: *public_key,
            secret: None,
        }
    }

    /// Like [`from_public_key`](Self::from_public_key) for a slice whose
    /// length is not known statically.
    pub fn from_public_key_slice(public_key: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] = public_key
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKey(public_key.len()))?;
        Ok(Self::from_public_key(&bytes))
    }

    /// Generate a fresh keypair from the provider's secure RNG.
    pub fn random() -> Self {
        let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
        default_provider().random_bytes(&mut seed[..]);
        Self::from_raw_seed(&seed)
    }

    /// The master keypair of `network`: its seed is the network ID.
    pub fn master(network: &Network) -> Self {
        let kp = Self::from_raw_seed(&network.network_id());
        debug!(network = ?network, account = %kp.account_id(), "derived network master keypair");
        kp
    }

    /// Whether `value` is a well-formed `G...` account ID.
    pub fn is_valid_public_key(value: &str) -> bool {
        strkey::decode_account_id(value).is_ok()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// `G...` text of the public key.
    pub fn account_id(&self) -> String {
        strkey::encode_account_id(&self.public_key)
    }

    /// `S...` text of the seed.
    pub fn seed(&self) -> Result<String, KeyError> {
        let secret = self.secret.as_ref().ok_or(KeyError::NoSecretKey)?;
        Ok(strkey::encode_seed(&secret.seed))
    }

    /// The 32 raw public key bytes.
    pub fn raw_public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.public_key
    }

    /// The 32 raw seed bytes, if this keypair can sign.
    pub fn raw_seed(&self) -> Option<&[u8; SEED_LENGTH]> {
        self.secret.as_ref().map(|s| &*s.seed)
    }

    /// The 64-byte expanded secret key (seed followed by public key), if
    /// this keypair can sign.
    pub fn raw_secret_key(&self) -> Option<&[u8; SECRET_KEY_LENGTH]> {
        self.secret.as_ref().map(|s| &*s.secret_key)
    }

    /// The public key as an account ID record.
    pub fn xdr_account_id(&self) -> AccountId {
        PublicKey::Ed25519(self.public_key)
    }

    /// The public key as a wire `PublicKey`.
    pub fn xdr_public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.public_key)
    }

    /// Last four bytes of the encoded account ID record. The record ends
    /// with the raw key, so these are the key's last four bytes.
    pub fn signature_hint(&self) -> [u8; SIGNATURE_HINT_LENGTH] {
        let mut hint = [0u8; SIGNATURE_HINT_LENGTH];
        hint.copy_from_slice(&self.public_key[PUBLIC_KEY_LENGTH - SIGNATURE_HINT_LENGTH..]);
        hint
    }

    /// Whether this keypair holds secret material.
    pub fn can_sign(&self) -> bool {
        self.secret.is_some()
    }

    // -----------------------------------------------------------------------
    // Signing
    // -----------------------------------------------------------------------

    /// Detached Ed25519 signature over `data`.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyError> {
        let secret = self.secret.as_ref().ok_or(KeyError::NoSecretKey)?;
        Ok(default_provider().sign(&secret.secret_key, data).to_vec())
    }

    /// Check `signature` over `data`. Never fails; bad input is `false`.
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        default_provider().verify(&self.public_key, data, signature)
    }

    /// Signature paired with this key's hint, ready for an envelope.
    pub fn sign_decorated(&self, data: &[u8]) -> Result<DecoratedSignature, KeyError> {
        Ok(DecoratedSignature {
            hint: self.signature_hint(),
            signature: self.sign(data)?,
        })
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key && self.raw_seed() == other.raw_seed()
    }
}

impl Eq for Keypair {}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Keypair(account={}, can_sign={})",
            self.account_id(),
            self.can_sign()
        )
    }
}
