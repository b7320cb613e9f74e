//! Asset value type.
//!
//! An asset is either the native currency or a credit issued by an account,
//! identified by a 1–12 character alphanumeric code. Codes of up to four
//! characters use the `alphanum4` wire arm, longer ones `alphanum12`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{ALPHANUM4_CODE_LENGTH, MAX_ASSET_CODE_LENGTH, NATIVE_ASSET_CODE, PUBLIC_KEY_LENGTH};
use crate::identity::strkey;
use crate::xdr::{self, AlphaNum12, AlphaNum4, PublicKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset code must be 1-12 ASCII alphanumerics, got '{0}'")]
    InvalidCode(String),

    #[error("asset issuer '{0}' is not a valid account ID")]
    InvalidIssuer(String),
}

/// A native or issued asset.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AssetRepr", into = "AssetRepr")]
pub struct Asset {
    code: String,
    issuer: Option<[u8; PUBLIC_KEY_LENGTH]>,
}

impl Asset {
    /// The network's native currency.
    pub fn native() -> Self {
        Self {
            code: NATIVE_ASSET_CODE.to_string(),
            issuer: None,
        }
    }

    /// An issued asset.
    pub fn new(code: &str, issuer: &str) -> Result<Self, AssetError> {
        validate_code(code)?;
        let issuer = strkey::decode_account_id(issuer)
            .map_err(|_| AssetError::InvalidIssuer(issuer.to_string()))?;
        Ok(Self {
            code: code.to_string(),
            issuer: Some(issuer),
        })
    }

    pub fn is_native(&self) -> bool {
        self.issuer.is_none()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// `G...` issuer, `None` for the native asset.
    pub fn issuer(&self) -> Option<String> {
        self.issuer.as_ref().map(strkey::encode_account_id)
    }

    /// `"native"`, `"credit_alphanum4"` or `"credit_alphanum12"`.
    pub fn asset_type(&self) -> &'static str {
        if self.is_native() {
            "native"
        } else if self.code.len() <= ALPHANUM4_CODE_LENGTH {
            "credit_alphanum4"
        } else {
            "credit_alphanum12"
        }
    }

    /// Wire form.
    pub fn to_xdr_object(&self) -> xdr::Asset {
        match self.issuer {
            None => xdr::Asset::Native,
            Some(issuer) if self.code.len() <= ALPHANUM4_CODE_LENGTH => {
                xdr::Asset::CreditAlphanum4(AlphaNum4 {
                    asset_code: pad_code(&self.code),
                    issuer: PublicKey::Ed25519(issuer),
                })
            }
            Some(issuer) => xdr::Asset::CreditAlphanum12(AlphaNum12 {
                asset_code: pad_code(&self.code),
                issuer: PublicKey::Ed25519(issuer),
            }),
        }
    }

    /// Back from wire form. NUL padding is trimmed from the code.
    ///
    /// The wire arm is not kept: an asset is its code and issuer, and
    /// [`to_xdr_object`](Self::to_xdr_object) picks the arm from the code
    /// length. A short code that arrived in an `alphanum12` record therefore
    /// re-encodes as `alphanum4`.
    pub fn from_xdr_object(asset: &xdr::Asset) -> Result<Self, AssetError> {
        let (code, issuer) = match asset {
            xdr::Asset::Native => return Ok(Self::native()),
            xdr::Asset::CreditAlphanum4(a) => (trim_code(&a.asset_code)?, a.issuer),
            xdr::Asset::CreditAlphanum12(a) => (trim_code(&a.asset_code)?, a.issuer),
        };
        validate_code(&code)?;
        Ok(Self {
            code,
            issuer: Some(*issuer.ed25519()),
        })
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Asset({self})")
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issuer() {
            None => f.write_str("native"),
            Some(issuer) => write!(f, "{}:{}", self.code, issuer),
        }
    }
}

fn validate_code(code: &str) -> Result<(), AssetError> {
    if code.is_empty()
        || code.len() > MAX_ASSET_CODE_LENGTH
        || !code.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(AssetError::InvalidCode(code.to_string()));
    }
    Ok(())
}

/// NUL-pad `code` to `N` bytes. Callers have already checked the length.
pub(crate) fn pad_code<const N: usize>(code: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let len = code.len().min(N);
    out[..len].copy_from_slice(&code.as_bytes()[..len]);
    out
}

/// Strip trailing NULs from a padded code.
pub(crate) fn trim_code(bytes: &[u8]) -> Result<String, AssetError> {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    String::from_utf8(bytes[..end].to_vec())
        .map_err(|_| AssetError::InvalidCode(String::from_utf8_lossy(bytes).into_owned()))
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct AssetRepr {
    code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    issuer: Option<String>,
}

impl TryFrom<AssetRepr> for Asset {
    type Error = AssetError;

    fn try_from(repr: AssetRepr) -> Result<Self, Self::Error> {
        match repr.issuer {
            Some(issuer) => Asset::new(&repr.code, &issuer),
            None if repr.code == NATIVE_ASSET_CODE => Ok(Asset::native()),
            None => Err(AssetError::InvalidIssuer(String::new())),
        }
    }
}

impl From<Asset> for AssetRepr {
    fn from(asset: Asset) -> Self {
        AssetRepr {
            issuer: asset.issuer(),
            code: asset.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "GDLVVGABQKYQVN6VJP7NHSLEA45A5YLS6PNKMIZFV4BBU2HXA5IRVHUR";

    #[test]
    fn native_asset() {
        let native = Asset::native();
        assert!(native.is_native());
        assert_eq!(native.code(), "XLM");
        assert_eq!(native.issuer(), None);
        assert_eq!(native.asset_type(), "native");
        assert_eq!(native.to_xdr_object(), xdr::Asset::Native);
    }

    #[test]
    fn short_code_uses_alphanum4() {
        let usd = Asset::new("USD", ISSUER).unwrap();
        assert_eq!(usd.asset_type(), "credit_alphanum4");
        match usd.to_xdr_object() {
            xdr::Asset::CreditAlphanum4(a) => assert_eq!(&a.asset_code, b"USD\0"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(Asset::from_xdr_object(&usd.to_xdr_object()).unwrap(), usd);
    }

    #[test]
    fn short_code_in_alphanum12_record_normalizes_to_alphanum4() {
        let mut asset_code = [0u8; 12];
        asset_code[..3].copy_from_slice(b"USD");
        let wire = xdr::Asset::CreditAlphanum12(AlphaNum12 {
            asset_code,
            issuer: PublicKey::Ed25519(strkey::decode_account_id(ISSUER).unwrap()),
        });
        let decoded = Asset::from_xdr_object(&wire).unwrap();
        assert_eq!(decoded, Asset::new("USD", ISSUER).unwrap());
        assert!(matches!(decoded.to_xdr_object(), xdr::Asset::CreditAlphanum4(_)));
    }

    #[test]
    fn long_code_uses_alphanum12() {
        let long = Asset::new("LONGCODE1", ISSUER).unwrap();
        assert_eq!(long.asset_type(), "credit_alphanum12");
        let back = Asset::from_xdr_object(&long.to_xdr_object()).unwrap();
        assert_eq!(back.code(), "LONGCODE1");
        assert_eq!(back.issuer().as_deref(), Some(ISSUER));
    }

    #[test]
    fn rejects_bad_codes_and_issuers() {
        assert!(matches!(Asset::new("", ISSUER), Err(AssetError::InvalidCode(_))));
        assert!(matches!(
            Asset::new("THIRTEENCHARS", ISSUER),
            Err(AssetError::InvalidCode(_))
        ));
        assert!(matches!(Asset::new("US-D", ISSUER), Err(AssetError::InvalidCode(_))));
        assert!(matches!(Asset::new("USD", "GABC"), Err(AssetError::InvalidIssuer(_))));
    }

    #[test]
    fn serde_shape() {
        let usd = Asset::new("USD", ISSUER).unwrap();
        let json = serde_json::to_value(&usd).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "USD", "issuer": ISSUER }));
        let back: Asset = serde_json::from_value(json).unwrap();
        assert_eq!(back, usd);

        let native: Asset = serde_json::from_value(serde_json::json!({ "code": "XLM" })).unwrap();
        assert!(native.is_native());
    }

    #[test]
    fn display() {
        assert_eq!(Asset::native().to_string(), "native");
        assert_eq!(
            Asset::new("EUR", ISSUER).unwrap().to_string(),
            format!("EUR:{ISSUER}")
        );
    }
}
