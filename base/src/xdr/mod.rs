//! # Binary Record Codec
//!
//! The network speaks XDR (RFC 4506): big-endian, every item padded to a
//! multiple of four bytes, unions prefixed by an `int` discriminant. This
//! module carries exactly the record types the transaction core needs and
//! nothing else.
//!
//! ```text
//! int / unsigned int   4 bytes, big-endian
//! hyper                8 bytes, big-endian
//! bool                 int, 0 or 1
//! opaque[n]            n bytes + zero padding to 4
//! opaque<max>, string  u32 length + bytes + zero padding
//! T*                   bool present + T
//! T<max>               u32 count + items
//! ```
//!
//! Decoding is strict: short input, oversize lengths, non-zero padding and
//! unknown discriminants are all errors, and a full record must consume
//! every byte it is given.

pub mod types;

pub use types::*;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by the binary record codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("invalid discriminant {value} for {type_name}")]
    InvalidDiscriminant {
        /// The union or enum being decoded.
        type_name: &'static str,
        /// The value found on the wire.
        value: i32,
    },

    #[error("length {got} exceeds maximum {max}")]
    LengthExceeded { max: u32, got: usize },

    #[error("non-zero padding bytes")]
    InvalidPadding,

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),

    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A record that can be written in canonical binary form.
pub trait WriteXdr {
    /// Append the encoded record to `out`.
    fn write_xdr(&self, out: &mut BytesMut) -> Result<(), XdrError>;

    /// Encode into a fresh byte vector.
    fn to_xdr_bytes(&self) -> Result<Vec<u8>, XdrError> {
        let mut out = BytesMut::new();
        self.write_xdr(&mut out)?;
        Ok(out.to_vec())
    }

    /// Encode and wrap in standard base64.
    fn to_xdr_base64(&self) -> Result<String, XdrError> {
        Ok(BASE64.encode(self.to_xdr_bytes()?))
    }
}

/// A record that can be read back from canonical binary form.
pub trait ReadXdr: Sized {
    /// Read one record from the front of `buf`, advancing it.
    fn read_xdr(buf: &mut &[u8]) -> Result<Self, XdrError>;

    /// Decode a complete record. Trailing bytes are an error.
    fn from_xdr_bytes(bytes: &[u8]) -> Result<Self, XdrError> {
        let mut buf = bytes;
        let value = Self::read_xdr(&mut buf)?;
        if !buf.is_empty() {
            return Err(XdrError::TrailingBytes(buf.len()));
        }
        Ok(value)
    }

    /// Decode a complete record from standard base64.
    fn from_xdr_base64(encoded: &str) -> Result<Self, XdrError> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| XdrError::InvalidBase64(e.to_string()))?;
        Self::from_xdr_bytes(&bytes)
    }
}

// ---------------------------------------------------------------------------
// Primitive writers
// ---------------------------------------------------------------------------

pub(crate) fn write_int(out: &mut BytesMut, value: i32) {
    out.put_i32(value);
}

pub(crate) fn write_uint(out: &mut BytesMut, value: u32) {
    out.put_u32(value);
}

pub(crate) fn write_hyper(out: &mut BytesMut, value: i64) {
    out.put_i64(value);
}

pub(crate) fn write_uhyper(out: &mut BytesMut, value: u64) {
    out.put_u64(value);
}

pub(crate) fn write_bool(out: &mut BytesMut, value: bool) {
    out.put_i32(i32::from(value));
}

fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

pub(crate) fn write_fixed_opaque(out: &mut BytesMut, data: &[u8]) {
    out.put_slice(data);
    out.put_bytes(0, padding(data.len()));
}

pub(crate) fn write_var_opaque(out: &mut BytesMut, data: &[u8], max: u32) -> Result<(), XdrError> {
    if data.len() > max as usize {
        return Err(XdrError::LengthExceeded {
            max,
            got: data.len(),
        });
    }
    out.put_u32(data.len() as u32);
    write_fixed_opaque(out, data);
    Ok(())
}

pub(crate) fn write_string(out: &mut BytesMut, value: &str, max: u32) -> Result<(), XdrError> {
    write_var_opaque(out, value.as_bytes(), max)
}

pub(crate) fn write_option<T: WriteXdr>(out: &mut BytesMut, value: &Option<T>) -> Result<(), XdrError> {
    match value {
        Some(inner) => {
            write_bool(out, true);
            inner.write_xdr(out)
        }
        None => {
            write_bool(out, false);
            Ok(())
        }
    }
}

pub(crate) fn write_array<T: WriteXdr>(out: &mut BytesMut, items: &[T], max: u32) -> Result<(), XdrError> {
    if items.len() > max as usize {
        return Err(XdrError::LengthExceeded {
            max,
            got: items.len(),
        });
    }
    out.put_u32(items.len() as u32);
    items.iter().try_for_each(|item| item.write_xdr(out))
}

// ---------------------------------------------------------------------------
// Primitive readers
// ---------------------------------------------------------------------------

fn need(buf: &&[u8], needed: usize) -> Result<(), XdrError> {
    if buf.remaining() < needed {
        return Err(XdrError::UnexpectedEof {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

pub(crate) fn read_int(buf: &mut &[u8]) -> Result<i32, XdrError> {
    need(buf, 4)?;
    Ok(buf.get_i32())
}

pub(crate) fn read_uint(buf: &mut &[u8]) -> Result<u32, XdrError> {
    need(buf, 4)?;
    Ok(buf.get_u32())
}

pub(crate) fn read_hyper(buf: &mut &[u8]) -> Result<i64, XdrError> {
    need(buf, 8)?;
    Ok(buf.get_i64())
}

pub(crate) fn read_uhyper(buf: &mut &[u8]) -> Result<u64, XdrError> {
    need(buf, 8)?;
    Ok(buf.get_u64())
}

pub(crate) fn read_bool(buf: &mut &[u8]) -> Result<bool, XdrError> {
    match read_int(buf)? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(XdrError::InvalidDiscriminant {
            type_name: "bool",
            value,
        }),
    }
}

fn skip_padding(buf: &mut &[u8], len: usize) -> Result<(), XdrError> {
    let pad = padding(len);
    need(buf, pad)?;
    if buf[..pad].iter().any(|b| *b != 0) {
        return Err(XdrError::InvalidPadding);
    }
    buf.advance(pad);
    Ok(())
}

pub(crate) fn read_fixed_opaque<const N: usize>(buf: &mut &[u8]) -> Result<[u8; N], XdrError> {
    need(buf, N)?;
    let mut data = [0u8; N];
    buf.copy_to_slice(&mut data);
    skip_padding(buf, N)?;
    Ok(data)
}

pub(crate) fn read_var_opaque(buf: &mut &[u8], max: u32) -> Result<Vec<u8>, XdrError> {
    let len = read_uint(buf)?;
    if len > max {
        return Err(XdrError::LengthExceeded {
            max,
            got: len as usize,
        });
    }
    let len = len as usize;
    need(buf, len)?;
    let data = buf[..len].to_vec();
    buf.advance(len);
    skip_padding(buf, len)?;
    Ok(data)
}

pub(crate) fn read_string(buf: &mut &[u8], max: u32) -> Result<String, XdrError> {
    String::from_utf8(read_var_opaque(buf, max)?).map_err(|_| XdrError::InvalidUtf8)
}

pub(crate) fn read_option<T: ReadXdr>(buf: &mut &[u8]) -> Result<Option<T>, XdrError> {
    if read_bool(buf)? {
        Ok(Some(T::read_xdr(buf)?))
    } else {
        Ok(None)
    }
}

pub(crate) fn read_array<T: ReadXdr>(buf: &mut &[u8], max: u32) -> Result<Vec<T>, XdrError> {
    let count = read_uint(buf)?;
    if count > max {
        return Err(XdrError::LengthExceeded {
            max,
            got: count as usize,
        });
    }
    (0..count).map(|_| T::read_xdr(buf)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_big_endian() {
        let mut out = BytesMut::new();
        write_int(&mut out, -2);
        write_uint(&mut out, 0x0102_0304);
        write_hyper(&mut out, 1);
        assert_eq!(
            out.to_vec(),
            vec![0xff, 0xff, 0xff, 0xfe, 1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 1]
        );

        let mut buf = &out[..];
        assert_eq!(read_int(&mut buf).unwrap(), -2);
        assert_eq!(read_uint(&mut buf).unwrap(), 0x0102_0304);
        assert_eq!(read_hyper(&mut buf).unwrap(), 1);
        assert!(buf.is_empty());
    }

    #[test]
    fn strings_are_padded_to_four() {
        let mut out = BytesMut::new();
        write_string(&mut out, "abcde", 64).unwrap();
        assert_eq!(out.to_vec(), vec![0, 0, 0, 5, b'a', b'b', b'c', b'd', b'e', 0, 0, 0]);
        let mut buf = &out[..];
        assert_eq!(read_string(&mut buf, 64).unwrap(), "abcde");
    }

    #[test]
    fn nonzero_padding_is_rejected() {
        let bytes = [0u8, 0, 0, 1, b'x', 0, 1, 0];
        let mut buf = &bytes[..];
        assert_eq!(read_var_opaque(&mut buf, 64), Err(XdrError::InvalidPadding));
    }

    #[test]
    fn bounded_lengths_are_enforced_both_ways() {
        let mut out = BytesMut::new();
        assert!(matches!(
            write_string(&mut out, "toolong", 4),
            Err(XdrError::LengthExceeded { max: 4, got: 7 })
        ));

        let bytes = [0u8, 0, 0, 9];
        let mut buf = &bytes[..];
        assert!(matches!(
            read_var_opaque(&mut buf, 8),
            Err(XdrError::LengthExceeded { max: 8, got: 9 })
        ));
    }

    #[test]
    fn bool_accepts_only_zero_and_one() {
        let bytes = [0u8, 0, 0, 2];
        let mut buf = &bytes[..];
        assert!(matches!(
            read_bool(&mut buf),
            Err(XdrError::InvalidDiscriminant { type_name: "bool", value: 2 })
        ));
    }

    #[test]
    fn short_input_reports_eof() {
        let bytes = [0u8, 0];
        let mut buf = &bytes[..];
        assert_eq!(
            read_int(&mut buf),
            Err(XdrError::UnexpectedEof {
                needed: 4,
                remaining: 2
            })
        );
    }
}
