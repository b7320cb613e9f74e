//! # Hashing & Checksums
//!
//! Two families live here:
//!
//! - **SHA-256**: network IDs (`sha256(passphrase)`) and the double-hash
//!   checksum of the legacy base58 seed format.
//! - **CRC16/XModem**: the 2-byte checksum appended to every strkey.
//!
//! CRC16 is not a security primitive. It catches typos in copy-pasted
//! addresses and nothing more. Anything that needs integrity against an
//! adversary gets a signature.

use crc::{Crc, CRC_16_XMODEM};
use sha2::{Digest, Sha256};

/// CRC16/XModem: poly 0x1021, init 0, no reflection, no xor-out.
const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Compute the SHA-256 hash of the input data.
///
/// ```
/// use ledger_base::crypto::sha256;
///
/// let hash = sha256(b"ledger");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// `sha256(sha256(data))`. Used by the legacy base58 checksum.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// CRC16/XModem of `payload`, returned little-endian.
///
/// The strkey format stores the checksum low byte first, so callers can
/// append the result directly.
pub fn crc16_checksum(payload: &[u8]) -> [u8; 2] {
    XMODEM.checksum(payload).to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn double_sha256_differs_from_single() {
        let data = b"seed bytes";
        assert_ne!(sha256(data), double_sha256(data));
        assert_eq!(double_sha256(data), sha256(&sha256(data)));
    }

    #[test]
    fn crc16_check_value() {
        // Standard XModem check value for "123456789" is 0x31C3.
        assert_eq!(crc16_checksum(b"123456789"), [0xC3, 0x31]);
    }

    #[test]
    fn crc16_empty_payload_is_zero() {
        assert_eq!(crc16_checksum(&[]), [0, 0]);
    }

    #[test]
    fn crc16_detects_single_byte_change() {
        let a = crc16_checksum(&[0x30, 1, 2, 3]);
        let b = crc16_checksum(&[0x30, 1, 2, 4]);
        assert_ne!(a, b);
    }
}
