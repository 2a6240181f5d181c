//! Ledgerdelta Meta - per-account balance changes from transaction metadata
//!
//! Given a transaction's `AffectedNodes` and an account address, work out how
//! much of each currency that account gained or lost.
//!
//! # Key Types
//! - `AffectedNode`: Created / Modified / Deleted ledger entry, resolved at decode time
//! - `AccountRootParser`: XRP delta from an `AccountRoot` node
//! - `TrustLineParser`: issued-currency delta and issuer from a `RippleState` node
//! - `BalanceChangeAggregator`: dispatch + merge per currency
//! - `NodeChange`: per-node outcome, either a change or an explicit skip reason

pub mod account_root;
pub mod aggregate;
pub mod change;
pub mod config;
pub mod error;
pub mod node;
pub mod trust_line;

pub use account_root::AccountRootParser;
pub use aggregate::BalanceChangeAggregator;
pub use change::{BalanceChange, NodeChange, SkipReason};
pub use config::MetaConfig;
pub use error::MetaError;
pub use node::{AffectedNode, LedgerEntryType, NodeFields, Transaction, TransactionMeta};
pub use trust_line::{TrustLineEndpoints, TrustLineParser, TrustLineSide};
