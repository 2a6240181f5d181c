//! Decimal arithmetic capability
//!
//! Ledger amounts must be reproducible to the last digit, so nothing in this
//! workspace touches `f64`. Issued amounts span 16 significant digits with
//! exponents from -96 to +80, and the difference of two of them can need far
//! more digits than any fixed-width decimal holds. Components receive a
//! `DecimalArithmetic` implementation instead of calling operators directly;
//! the default `ExactDecimal` is backed by arbitrary-precision `BigDecimal`
//! and never rounds.

use crate::error::AmountError;
use crate::number;
use bigdecimal::{BigDecimal, Signed, Zero};

/// Stateless exact decimal arithmetic.
///
/// Implementations must be deterministic: the same inputs always give the
/// same output or the same error. Bounded implementations report results
/// they cannot hold as [`AmountError::Overflow`].
pub trait DecimalArithmetic: Clone + Send + Sync {
    /// Parse a decimal string in plain (`-12.5`) or scientific (`1.5e-7`) notation.
    fn parse(&self, raw: &str) -> Result<BigDecimal, AmountError>;

    fn add(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, AmountError>;

    fn sub(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, AmountError>;

    fn mul(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, AmountError>;

    /// Render a value the way it goes out on the wire.
    fn render(&self, value: &BigDecimal) -> String {
        to_plain_string(value)
    }
}

/// Arbitrary-precision arithmetic; every operation is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactDecimal;

impl DecimalArithmetic for ExactDecimal {
    fn parse(&self, raw: &str) -> Result<BigDecimal, AmountError> {
        number::parse_decimal(raw).ok_or_else(|| AmountError::InvalidDecimal(raw.to_string()))
    }

    fn add(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, AmountError> {
        Ok(lhs + rhs)
    }

    fn sub(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, AmountError> {
        Ok(lhs - rhs)
    }

    fn mul(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, AmountError> {
        Ok(lhs * rhs)
    }
}

/// Strip trailing fractional zeros and the sign of zero.
///
/// `1.000000` becomes `1`, `-0` becomes `0`.
pub fn canonical(value: &BigDecimal) -> BigDecimal {
    if value.is_zero() {
        BigDecimal::zero()
    } else {
        value.normalized()
    }
}

/// Canonical value in positional notation, never scientific.
///
/// `BigDecimal`'s own `Display` switches to exponent form for very large or
/// very small scales; the wire format does not.
pub fn to_plain_string(value: &BigDecimal) -> String {
    let (mantissa, scale) = canonical(value).as_bigint_and_exponent();
    if mantissa.is_zero() {
        return "0".to_string();
    }
    let digits = mantissa.magnitude().to_string();
    let sign = if mantissa.is_negative() { "-" } else { "" };

    if scale <= 0 {
        let zeros = "0".repeat(usize::try_from(-scale).unwrap_or(0));
        return format!("{sign}{digits}{zeros}");
    }

    let scale = usize::try_from(scale).unwrap_or(0);
    if digits.len() > scale {
        let (int, frac) = digits.split_at(digits.len() - scale);
        format!("{sign}{int}.{frac}")
    } else {
        let pad = "0".repeat(scale - digits.len());
        format!("{sign}0.{pad}{digits}")
    }
}

/// Serde adapter: plain decimal strings on the wire.
///
/// ```
/// use bigdecimal::BigDecimal;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "ledgerdelta_core::decimal::plain")]
///     value: BigDecimal,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"value":"1e-3"}"#).unwrap();
/// assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"value":"0.001"}"#);
/// ```
pub mod plain {
    use super::{to_plain_string, DecimalArithmetic, ExactDecimal};
    use bigdecimal::BigDecimal;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_plain_string(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ExactDecimal.parse(&raw).map_err(de::Error::custom)
    }
}
