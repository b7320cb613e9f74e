//! Price conversion.
//!
//! Prices travel as `int32` numerator/denominator pairs. Decimal input is
//! turned into the best rational approximation whose terms fit in
//! `i32::MAX`, using the continued-fraction expansion.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::trace;

use super::amount::{parse_decimal, AmountError};
use super::types::PriceInput;
use crate::config::MAX_PRICE_TERM;
use crate::xdr::Price;

/// Convert caller input to a wire price.
pub fn to_price(input: &PriceInput) -> Result<Price, AmountError> {
    match input {
        PriceInput::Ratio { n, d } => {
            if !(0..=MAX_PRICE_TERM).contains(n) {
                return Err(AmountError::InvalidPrice(format!("numerator {n} out of range")));
            }
            if !(1..=MAX_PRICE_TERM).contains(d) {
                return Err(AmountError::InvalidPrice(format!("denominator {d} out of range")));
            }
            Ok(Price {
                n: *n as i32,
                d: *d as i32,
            })
        }
        PriceInput::Decimal(text) => {
            let value = parse_decimal(text)
                .ok_or_else(|| AmountError::InvalidPrice(format!("'{text}' is not a number")))?;
            if value.is_sign_negative() && !value.is_zero() {
                return Err(AmountError::InvalidPrice(format!("'{text}' is negative")));
            }
            best_r(value).ok_or_else(|| AmountError::PriceApproximationFailed(text.clone()))
        }
    }
}

/// Decimal text of `n / d`, normalized.
pub fn from_price(price: &Price) -> Result<String, AmountError> {
    if price.d <= 0 || price.n < 0 {
        return Err(AmountError::InvalidPrice(format!("{}/{}", price.n, price.d)));
    }
    Decimal::from(price.n)
        .checked_div(Decimal::from(price.d))
        .map(|q| q.normalize().to_string())
        .ok_or_else(|| AmountError::InvalidPrice(format!("{}/{}", price.n, price.d)))
}

/// Best rational approximation of `number` with both terms ≤ `i32::MAX`.
///
/// Walks the continued fraction `a0 + 1/(a1 + 1/(a2 + ...))`, keeping the
/// last convergent `h/k` whose terms still fit. Returns `None` when that
/// convergent has a zero term (zero input, or input too large to represent).
pub fn best_r(number: Decimal) -> Option<Price> {
    let max = Decimal::from(MAX_PRICE_TERM);
    let mut number = number;
    let (mut h2, mut k2) = (Decimal::ZERO, Decimal::ONE);
    let (mut h1, mut k1) = (Decimal::ONE, Decimal::ZERO);

    loop {
        if number > max {
            break;
        }
        let a = number.floor();
        let f = number - a;
        let h = a * h1 + h2;
        let k = a * k1 + k2;
        if h > max || k > max {
            break;
        }
        (h2, k2) = (h1, k1);
        (h1, k1) = (h, k);
        if f.is_zero() {
            break;
        }
        match Decimal::ONE.checked_div(f) {
            Some(next) => number = next,
            None => break,
        }
    }

    trace!(n = %h1, d = %k1, "price convergent");
    if h1.is_zero() || k1.is_zero() {
        return None;
    }
    Some(Price {
        n: h1.to_i32()?,
        d: k1.to_i32()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(text: &str) -> Result<Price, AmountError> {
        to_price(&PriceInput::Decimal(text.into()))
    }

    #[test]
    fn exact_fractions() {
        assert_eq!(decimal("0.5").unwrap(), Price { n: 1, d: 2 });
        assert_eq!(decimal("1.25").unwrap(), Price { n: 5, d: 4 });
        assert_eq!(decimal("1.1").unwrap(), Price { n: 11, d: 10 });
        assert_eq!(decimal("2").unwrap(), Price { n: 2, d: 1 });
        assert_eq!(decimal("0.1").unwrap(), Price { n: 1, d: 10 });
    }

    #[test]
    fn irrational_looking_input_stays_in_range() {
        let price = decimal("3.14159265358979").unwrap();
        assert!(price.n > 0 && price.d > 0);
        let approx = price.n as f64 / price.d as f64;
        assert!((approx - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn zero_cannot_be_approximated() {
        assert_eq!(
            decimal("0"),
            Err(AmountError::PriceApproximationFailed("0".into()))
        );
    }

    #[test]
    fn too_large_cannot_be_approximated() {
        assert!(matches!(
            decimal("3000000000"),
            Err(AmountError::PriceApproximationFailed(_))
        ));
    }

    #[test]
    fn negative_or_garbage_is_invalid() {
        assert!(matches!(decimal("-1.5"), Err(AmountError::InvalidPrice(_))));
        assert!(matches!(decimal("abc"), Err(AmountError::InvalidPrice(_))));
    }

    #[test]
    fn ratio_bounds() {
        assert_eq!(
            to_price(&PriceInput::Ratio { n: 3, d: 7 }).unwrap(),
            Price { n: 3, d: 7 }
        );
        assert!(to_price(&PriceInput::Ratio { n: 0, d: 1 }).is_ok());
        assert!(to_price(&PriceInput::Ratio { n: 1, d: 0 }).is_err());
        assert!(to_price(&PriceInput::Ratio { n: -1, d: 1 }).is_err());
        assert!(to_price(&PriceInput::Ratio {
            n: i32::MAX as i64 + 1,
            d: 1
        })
        .is_err());
    }

    #[test]
    fn price_to_text() {
        assert_eq!(from_price(&Price { n: 1, d: 2 }).unwrap(), "0.5");
        assert_eq!(from_price(&Price { n: 5, d: 4 }).unwrap(), "1.25");
        assert_eq!(
            from_price(&Price { n: 1, d: 3 }).unwrap(),
            "0.3333333333333333333333333333"
        );
        assert!(from_price(&Price { n: 1, d: 0 }).is_err());
    }
}
