//! Ledger selector - which ledger version a lookup should read
//!
//! Accepts the shortcut keywords, a ledger index or a 256-bit ledger hash.
//! Anything unrecognized falls back to the latest validated ledger.
//!
//! Indexes are read leniently, the way a JavaScript `Number()` conversion
//! reads them: `" 5"`, `"1e3"` and `"0x10"` are all indexes. Only values that
//! land on a whole number in `u64` range are kept; fractions and negatives
//! fall back like any other unrecognized input.

use crate::number::{js_number, JsNumber};
use bigdecimal::{Signed, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Named ledger shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LedgerShortcut {
    /// The open ledger currently being built
    Current,
    /// The most recently closed ledger
    Closed,
    /// The most recent ledger validated by consensus
    Validated,
}

/// Ledger selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LedgerSpecifier {
    Shortcut(LedgerShortcut),
    Index(u64),
    /// 64 hex digits
    Hash(String),
}

impl LedgerSpecifier {
    /// Parse a selector, falling back to `validated`.
    pub fn parse(raw: &str) -> Self {
        if let Ok(shortcut) = LedgerShortcut::from_str(raw) {
            return LedgerSpecifier::Shortcut(shortcut);
        }

        if let Some(index) = ledger_index(raw) {
            return LedgerSpecifier::Index(index);
        }

        if is_hash256(raw) {
            return LedgerSpecifier::Hash(raw.to_string());
        }

        LedgerSpecifier::default()
    }
}

fn ledger_index(raw: &str) -> Option<u64> {
    if raw.is_empty() {
        return None;
    }
    match js_number(raw) {
        JsNumber::Finite(value) if !value.is_negative() && value.is_integer() => value.to_u64(),
        _ => None,
    }
}

fn is_hash256(raw: &str) -> bool {
    raw.len() == 64 && raw.chars().all(|c| c.is_ascii_hexdigit())
}

impl Default for LedgerSpecifier {
    fn default() -> Self {
        LedgerSpecifier::Shortcut(LedgerShortcut::Validated)
    }
}

impl fmt::Display for LedgerSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerSpecifier::Shortcut(shortcut) => write!(f, "{}", shortcut),
            LedgerSpecifier::Index(index) => write!(f, "{}", index),
            LedgerSpecifier::Hash(hash) => write!(f, "{}", hash),
        }
    }
}

impl From<String> for LedgerSpecifier {
    fn from(raw: String) -> Self {
        LedgerSpecifier::parse(&raw)
    }
}

impl From<LedgerSpecifier> for String {
    fn from(selector: LedgerSpecifier) -> Self {
        selector.to_string()
    }
}
