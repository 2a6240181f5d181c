//! Metadata parsing errors

use ledgerdelta_core::AmountError;
use thiserror::Error;

/// Errors that abort balance-change extraction for a whole transaction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    /// A balance or limit is not a usable decimal. Upstream data is corrupt.
    #[error("Arithmetic failure: {0}")]
    Arithmetic(#[from] AmountError),

    /// Only raised when `strict_node_shapes` is enabled
    #[error("Malformed affected node at index {index}: {reason}")]
    MalformedNode { index: usize, reason: &'static str },

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
}
