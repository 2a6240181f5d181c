//! Currency amounts - wire forms and their canonical record
//!
//! On the wire an amount is either a bare drops string (native) or a
//! `{currency, issuer, value}` object (issued, already in major units).
//! `AmountNormalizer` maps both to `CanonicalAmount` and back.

use crate::currency::Currency;
use crate::decimal::{DecimalArithmetic, ExactDecimal};
use crate::drops::DropsConverter;
use crate::error::AmountError;
use crate::number::{js_number, JsNumber};
use serde::{Deserialize, Serialize};

/// Structured issued-currency amount as it appears in ledger JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedAmount {
    pub currency: String,
    #[serde(default)]
    pub issuer: String,
    pub value: String,
}

/// Wire-level currency amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrencyAmount {
    /// Native amount in drops
    Drops(String),
    /// Issued amount in major units
    Issued(IssuedAmount),
}

/// Amount independent of its wire encoding.
///
/// `value` is in major units for every currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalAmount {
    pub currency: Currency,
    pub counterparty: String,
    pub value: String,
}

/// Parsed `value+currency+issuer` or `currency+issuer` query token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub currency: String,
    pub issuer: String,
}

/// Converts currency amounts between wire and canonical forms.
#[derive(Debug, Clone, Default)]
pub struct AmountNormalizer<A = ExactDecimal> {
    drops: DropsConverter<A>,
}

impl AmountNormalizer<ExactDecimal> {
    pub fn new() -> Self {
        Self::with_arithmetic(ExactDecimal)
    }
}

impl<A: DecimalArithmetic> AmountNormalizer<A> {
    pub fn with_arithmetic(arith: A) -> Self {
        Self {
            drops: DropsConverter::with_arithmetic(arith),
        }
    }

    /// Wire amount -> canonical amount.
    ///
    /// Drops are converted to XRP; issued values pass through untouched.
    pub fn to_canonical(&self, amount: &CurrencyAmount) -> Result<CanonicalAmount, AmountError> {
        match amount {
            CurrencyAmount::Drops(drops) => Ok(CanonicalAmount {
                currency: Currency::Native,
                counterparty: String::new(),
                value: self.drops.to_major_units(drops)?,
            }),
            CurrencyAmount::Issued(issued) => Ok(CanonicalAmount {
                currency: Currency::from(issued.currency.as_str()),
                counterparty: issued.issuer.clone(),
                value: issued.value.clone(),
            }),
        }
    }

    /// Canonical amount -> wire amount.
    ///
    /// Native values are converted back to drops (truncated toward zero).
    pub fn to_wire(&self, amount: &CanonicalAmount) -> Result<CurrencyAmount, AmountError> {
        match &amount.currency {
            Currency::Native => Ok(CurrencyAmount::Drops(
                self.drops.to_minor_units(&amount.value)?,
            )),
            Currency::Issued(code) => Ok(CurrencyAmount::Issued(IssuedAmount {
                currency: code.clone(),
                issuer: amount.counterparty.clone(),
                value: amount.value.clone(),
            })),
        }
    }

    /// Parse a `+`-delimited query token.
    ///
    /// A first segment that reads as a number selects `value+currency+issuer`,
    /// anything else `currency+issuer`. "Number" follows the lenient rules of
    /// a JavaScript `Number()` conversion: blank counts (as zero), so does
    /// `Infinity` or `0x1F`; digit separators like `1_0` do not. Missing
    /// trailing segments are empty strings.
    pub fn parse_query(&self, query: &str) -> CurrencyQuery {
        let mut segments = query.split('+');
        let mut next = || segments.next().unwrap_or_default().to_string();

        let first = next();
        if js_number(&first) != JsNumber::NaN {
            CurrencyQuery {
                value: Some(first),
                currency: next(),
                issuer: next(),
            }
        } else {
            CurrencyQuery {
                value: None,
                currency: first,
                issuer: next(),
            }
        }
    }
}
