//! Balance changes and per-node outcomes

use bigdecimal::BigDecimal;
use ledgerdelta_core::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Net change of one currency for the account of interest.
///
/// `value` is `final - previous`, serialized as a plain decimal string.
/// `issuer` is empty for XRP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    #[serde(with = "ledgerdelta_core::decimal::plain")]
    pub value: BigDecimal,
    pub currency: Currency,
    pub issuer: String,
}

impl BalanceChange {
    pub fn native(value: BigDecimal) -> Self {
        Self {
            value,
            currency: Currency::Native,
            issuer: String::new(),
        }
    }
}

/// Why a node produced no balance change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Entry type without a balance (offers, directories, ...)
    UnsupportedEntryType(String),
    /// The entry belongs to other accounts
    OtherAccount,
    /// Fields missing or of the wrong shape for the entry type
    MalformedShape(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedEntryType(kind) => write!(f, "unsupported entry type {}", kind),
            SkipReason::OtherAccount => write!(f, "not owned by account"),
            SkipReason::MalformedShape(reason) => write!(f, "malformed: {}", reason),
        }
    }
}

/// Outcome of parsing a single affected node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeChange {
    Change(BalanceChange),
    Irrelevant(SkipReason),
}

impl NodeChange {
    pub(crate) fn malformed(reason: &'static str) -> Self {
        NodeChange::Irrelevant(SkipReason::MalformedShape(reason))
    }

    pub fn into_change(self) -> Option<BalanceChange> {
        match self {
            NodeChange::Change(change) => Some(change),
            NodeChange::Irrelevant(_) => None,
        }
    }
}
