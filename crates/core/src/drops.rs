//! Drops conversion - native minor units (drops) <-> major units (XRP)
//!
//! 1 XRP = 1,000,000 drops. Both directions go through `DecimalArithmetic`
//! so the result is exact.

use crate::decimal::{canonical, DecimalArithmetic, ExactDecimal};
use crate::error::AmountError;
use bigdecimal::{BigDecimal, num_bigint::BigInt};

/// Number of drops in one XRP
pub const DROPS_PER_XRP: i64 = 1_000_000;

/// Decimal places between drops and XRP
const DROPS_SCALE: i64 = 6;

/// Lossless converter between drops and XRP.
///
/// # Example
/// ```
/// use ledgerdelta_core::DropsConverter;
///
/// let converter = DropsConverter::new();
/// assert_eq!(converter.to_major_units("1000000").unwrap(), "1");
/// assert_eq!(converter.to_minor_units("0.000001").unwrap(), "1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DropsConverter<A = ExactDecimal> {
    arith: A,
}

impl DropsConverter<ExactDecimal> {
    pub fn new() -> Self {
        Self::with_arithmetic(ExactDecimal)
    }
}

impl<A: DecimalArithmetic> DropsConverter<A> {
    pub fn with_arithmetic(arith: A) -> Self {
        Self { arith }
    }

    /// Drops -> XRP, exact: one drop is `1e-6`.
    pub fn drops_to_native(&self, drops: &BigDecimal) -> Result<BigDecimal, AmountError> {
        let one_drop = BigDecimal::new(BigInt::from(1), DROPS_SCALE);
        let xrp = self.arith.mul(drops, &one_drop)?;
        Ok(canonical(&xrp))
    }

    /// XRP -> drops, multiplied by 1,000,000 and truncated toward zero.
    pub fn native_to_drops(&self, xrp: &BigDecimal) -> Result<BigDecimal, AmountError> {
        let drops = self.arith.mul(xrp, &BigDecimal::from(DROPS_PER_XRP))?;
        Ok(canonical(&drops.with_scale(0)))
    }

    /// String form of [`Self::drops_to_native`].
    pub fn to_major_units(&self, minor: &str) -> Result<String, AmountError> {
        let drops = self.arith.parse(minor)?;
        Ok(self.arith.render(&self.drops_to_native(&drops)?))
    }

    /// String form of [`Self::native_to_drops`].
    pub fn to_minor_units(&self, major: &str) -> Result<String, AmountError> {
        let xrp = self.arith.parse(major)?;
        Ok(self.arith.render(&self.native_to_drops(&xrp)?))
    }
}
