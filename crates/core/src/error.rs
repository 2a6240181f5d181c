//! Amount and arithmetic errors

use bigdecimal::BigDecimal;
use thiserror::Error;

/// Errors that can occur when parsing or combining decimal amounts.
///
/// Both variants mean the ledger data handed to us is corrupt or out of
/// range. Callers are expected to fail the whole operation rather than skip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid decimal amount: {0:?}")]
    InvalidDecimal(String),

    /// Raised by bounded `DecimalArithmetic` implementations; `ExactDecimal` never overflows.
    #[error("Decimal overflow: {lhs} {op} {rhs}")]
    Overflow {
        op: &'static str,
        lhs: BigDecimal,
        rhs: BigDecimal,
    },
}
