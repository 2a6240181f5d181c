//! Currency - native marker or issued currency code
//!
//! The ledger has exactly one native asset (XRP). Everything else is an
//! issued currency identified by its code; the code is carried verbatim,
//! whether it is a 3-letter ISO-style code or a 40-hex nonstandard code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire code of the native asset
pub const NATIVE_CURRENCY: &str = "XRP";

/// Currency of an amount or balance change.
///
/// # Examples
/// ```
/// use ledgerdelta_core::Currency;
///
/// let xrp: Currency = "XRP".into();
/// assert!(xrp.is_native());
///
/// let usd: Currency = "USD".into();
/// assert_eq!(usd.code(), "USD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    /// The ledger's native asset
    Native,
    /// An issued currency code
    Issued(String),
}

impl Currency {
    /// Returns the currency code as a string slice
    pub fn code(&self) -> &str {
        match self {
            Currency::Native => NATIVE_CURRENCY,
            Currency::Issued(code) => code.as_str(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        if code == NATIVE_CURRENCY {
            Currency::Native
        } else {
            Currency::Issued(code)
        }
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Currency::from(code.to_string())
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        match c {
            Currency::Native => NATIVE_CURRENCY.to_string(),
            Currency::Issued(code) => code,
        }
    }
}
