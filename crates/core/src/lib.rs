//! Ledgerdelta Core - Domain types
//!
//! This crate contains the building blocks shared by the metadata parsers:
//! - `DecimalArithmetic`: injected exact decimal arithmetic (`ExactDecimal` by default)
//! - `DropsConverter`: lossless drops <-> XRP conversion
//! - `Currency`: native marker or issued currency code
//! - `AmountNormalizer`: wire currency amounts <-> `CanonicalAmount`
//! - `LedgerSpecifier`: ledger selector parsing

pub mod amount;
pub mod currency;
pub mod decimal;
pub mod drops;
pub mod error;
pub mod ledger;
mod number;

pub use amount::{AmountNormalizer, CanonicalAmount, CurrencyAmount, CurrencyQuery, IssuedAmount};
pub use currency::{Currency, NATIVE_CURRENCY};
pub use decimal::{canonical, to_plain_string, DecimalArithmetic, ExactDecimal};
pub use drops::{DropsConverter, DROPS_PER_XRP};
pub use error::AmountError;
pub use ledger::{LedgerShortcut, LedgerSpecifier};
