//! Issued-currency balance changes from `RippleState` nodes
//!
//! A trust line is one ledger entry shared by two accounts. Its sides are
//! ordered structurally into "low" and "high", independent of who owes whom,
//! and its single `Balance` is signed from the low side's point of view.

use bigdecimal::{BigDecimal, Signed, Zero};
use ledgerdelta_core::{
    canonical, AmountError, Currency, DecimalArithmetic, ExactDecimal, IssuedAmount,
};
use serde::Deserialize;

use crate::change::{BalanceChange, NodeChange, SkipReason};
use crate::node::{field, AffectedNode};

/// One side of a trust line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustLineSide {
    pub issuer: String,
    pub limit: BigDecimal,
}

/// Low and high sides of a trust line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustLineEndpoints {
    pub low: TrustLineSide,
    pub high: TrustLineSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Negative,
    Zero,
    Positive,
}

impl Polarity {
    fn of(limit: &BigDecimal) -> Self {
        if limit.is_zero() {
            Polarity::Zero
        } else if limit.is_positive() {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

impl TrustLineEndpoints {
    /// Who issued the currency on this line.
    ///
    /// Decided by limit polarity and balance magnitudes only, never by which
    /// side the caller is on:
    /// - both limits zero or both positive: low side if the final or the
    ///   previous balance is positive, high side otherwise
    /// - only the high limit positive: low side
    /// - only the low limit positive: high side
    ///
    /// Negative limits do not occur on a valid ledger; they yield an empty issuer.
    pub fn issuer(&self, final_balance: &BigDecimal, previous_balance: &BigDecimal) -> &str {
        match (Polarity::of(&self.low.limit), Polarity::of(&self.high.limit)) {
            (Polarity::Zero, Polarity::Zero) | (Polarity::Positive, Polarity::Positive) => {
                if final_balance.is_positive() || previous_balance.is_positive() {
                    &self.low.issuer
                } else {
                    &self.high.issuer
                }
            }
            (_, Polarity::Positive) => &self.low.issuer,
            (Polarity::Positive, _) => &self.high.issuer,
            _ => "",
        }
    }
}

/// `HighLimit` / `LowLimit` body. Limits may carry a currency code too; only
/// the owning account and the amount matter here.
#[derive(Debug, Deserialize)]
struct LimitAmount {
    issuer: String,
    value: String,
}

/// `PreviousFields.Balance` body; only the amount is read.
#[derive(Debug, Deserialize)]
struct BalanceValue {
    value: String,
}

/// Computes the issued-currency delta of one `RippleState` node.
#[derive(Debug, Clone, Default)]
pub struct TrustLineParser<A = ExactDecimal> {
    arith: A,
}

impl TrustLineParser<ExactDecimal> {
    pub fn new() -> Self {
        Self::with_arithmetic(ExactDecimal)
    }
}

impl<A: DecimalArithmetic> TrustLineParser<A> {
    pub fn with_arithmetic(arith: A) -> Self {
        Self { arith }
    }

    pub fn parse(&self, node: &AffectedNode, address: &str) -> Result<NodeChange, AmountError> {
        let Some(fields) = node.current_fields() else {
            return Ok(NodeChange::malformed("RippleState without current fields"));
        };
        let (Some(high), Some(low), Some(balance)) = (
            field::<LimitAmount>(fields, "HighLimit"),
            field::<LimitAmount>(fields, "LowLimit"),
            field::<IssuedAmount>(fields, "Balance"),
        ) else {
            return Ok(NodeChange::malformed(
                "RippleState without HighLimit, LowLimit and Balance amounts",
            ));
        };

        let final_balance = self.arith.parse(&balance.value)?;
        let previous_balance = match node
            .previous_fields()
            .and_then(|previous| field::<BalanceValue>(previous, "Balance"))
        {
            Some(previous) => self.arith.parse(&previous.value)?,
            None => BigDecimal::zero(),
        };
        let delta = self.arith.sub(&final_balance, &previous_balance)?;

        // Balance is signed from the low side
        let value = if low.issuer == address {
            delta
        } else if high.issuer == address {
            self.arith.sub(&BigDecimal::zero(), &delta)?
        } else {
            return Ok(NodeChange::Irrelevant(SkipReason::OtherAccount));
        };

        let endpoints = TrustLineEndpoints {
            low: TrustLineSide {
                limit: self.arith.parse(&low.value)?,
                issuer: low.issuer,
            },
            high: TrustLineSide {
                limit: self.arith.parse(&high.value)?,
                issuer: high.issuer,
            },
        };
        let issuer = endpoints.issuer(&final_balance, &previous_balance).to_string();

        Ok(NodeChange::Change(BalanceChange {
            value: canonical(&value),
            currency: Currency::from(balance.currency),
            issuer,
        }))
    }
}
