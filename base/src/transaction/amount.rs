//! Fixed-point amount conversion.
//!
//! On the wire every amount is an `i64` count of 1/10,000,000ths of a unit.
//! Callers speak decimal text (`"12.5"`). Conversion goes through
//! `rust_decimal` so nothing ever touches a float.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::borrow::Cow;
use thiserror::Error;

use crate::config::{AMOUNT_DECIMAL_PLACES, MAX_INT64, ONE};

/// Errors from amount and price conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("could not approximate price '{0}' with 32-bit terms")]
    PriceApproximationFailed(String),
}

/// Parse decimal text, accepting plain (`"1.5"`) and scientific (`"1.5e3"`)
/// notation.
///
/// Parsing is exact: text carrying more precision than a `Decimal` holds is
/// rejected rather than rounded. Trailing fractional zeros carry no
/// precision and are dropped first.
pub(crate) fn parse_decimal(value: &str) -> Option<Decimal> {
    if value.is_empty()
        || !value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    match value.split_once(['e', 'E']) {
        None => Decimal::from_str_exact(&trim_fraction(value)).ok(),
        Some((mantissa, exponent)) => {
            let mantissa = trim_fraction(mantissa);
            Decimal::from_str_exact(&mantissa).ok()?;
            Decimal::from_scientific(&format!("{mantissa}e{exponent}")).ok()
        }
    }
}

/// Drop trailing zeros after the decimal point, and the point itself when
/// nothing follows it.
fn trim_fraction(value: &str) -> Cow<'_, str> {
    if !value.contains('.') {
        return Cow::Borrowed(value);
    }
    let trimmed = value.trim_end_matches('0');
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    match trimmed {
        "" | "-" | "+" => Cow::Owned(format!("{trimmed}0")),
        _ => Cow::Borrowed(trimmed),
    }
}

/// Whether `value` is an amount the network can carry.
///
/// Rejects negatives, zero unless `allow_zero`, more than seven fractional
/// digits, and anything whose scaled value exceeds `i64::MAX`. Never fails.
pub fn is_valid_amount(value: &str, allow_zero: bool) -> bool {
    let Some(amount) = parse_decimal(value) else {
        return false;
    };
    if amount.is_sign_negative() && !amount.is_zero() {
        return false;
    }
    if amount.is_zero() && !allow_zero {
        return false;
    }
    if amount.normalize().scale() > AMOUNT_DECIMAL_PLACES {
        return false;
    }
    match amount.checked_mul(Decimal::from(ONE)) {
        Some(scaled) => scaled <= Decimal::from(MAX_INT64),
        None => false,
    }
}

/// `round(value * ONE)` as a network integer.
///
/// ```
/// use ledger_base::transaction::amount::to_network_amount;
///
/// assert_eq!(to_network_amount("12.5").unwrap(), 125_000_000);
/// ```
pub fn to_network_amount(value: &str) -> Result<i64, AmountError> {
    parse_decimal(value)
        .and_then(|amount| amount.checked_mul(Decimal::from(ONE)))
        .and_then(|scaled| scaled.round().to_i64())
        .ok_or_else(|| AmountError::InvalidAmount(value.to_string()))
}

/// Decimal text for a network integer, without trailing zeros.
pub fn from_network_amount(raw: i64) -> String {
    Decimal::new(raw, AMOUNT_DECIMAL_PLACES).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_INT64_AMOUNT;

    #[test]
    fn accepts_ordinary_amounts() {
        for ok in ["10", "0.0000001", "922337203685.4775807", "1e3", "1.5E-3", "100.1000000"] {
            assert!(is_valid_amount(ok, false), "{ok} should be valid");
        }
    }

    #[test]
    fn rejects_bad_amounts() {
        for bad in [
            "",
            "abc",
            "-1",
            "0.00000001",
            "922337203685.4775808",
            "1 000",
            "1_000",
            "NaN",
            "Infinity",
        ] {
            assert!(!is_valid_amount(bad, true), "{bad} should be invalid");
        }
    }

    #[test]
    fn precision_beyond_decimal_scale_is_rejected() {
        let over_precise = "1.00000000000000000000000000001";
        assert!(!is_valid_amount(over_precise, false));
        assert!(to_network_amount(over_precise).is_err());
        assert!(!is_valid_amount("0.000000000000000000000000000000000001", true));
        assert!(!is_valid_amount("1.00000000000000000000000000001e2", false));
    }

    #[test]
    fn trailing_fraction_zeros_carry_no_precision() {
        let padded = format!("5.{}", "0".repeat(40));
        assert!(is_valid_amount(&padded, false));
        assert_eq!(to_network_amount(&padded).unwrap(), 5 * ONE);
        assert_eq!(to_network_amount("7.").unwrap(), 7 * ONE);
        assert!(is_valid_amount(".0", true));
        assert!(!is_valid_amount(".0", false));
    }

    #[test]
    fn zero_only_when_allowed() {
        assert!(!is_valid_amount("0", false));
        assert!(is_valid_amount("0", true));
        assert!(is_valid_amount("0.0", true));
    }

    #[test]
    fn scales_to_network_integers() {
        assert_eq!(to_network_amount("1").unwrap(), ONE);
        assert_eq!(to_network_amount("0.0000001").unwrap(), 1);
        assert_eq!(to_network_amount(MAX_INT64_AMOUNT).unwrap(), i64::MAX);
        assert_eq!(to_network_amount("2e2").unwrap(), 2_000_000_000);
    }

    #[test]
    fn out_of_range_is_an_error() {
        assert_eq!(
            to_network_amount("922337203686"),
            Err(AmountError::InvalidAmount("922337203686".into()))
        );
        assert!(to_network_amount("x").is_err());
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(from_network_amount(0), "0");
        assert_eq!(from_network_amount(1), "0.0000001");
        assert_eq!(from_network_amount(125_000_000), "12.5");
        assert_eq!(from_network_amount(ONE * 100), "100");
        assert_eq!(from_network_amount(i64::MAX), MAX_INT64_AMOUNT);
    }
}
