//! Ledger error types for boundary validation.
//!
//! These are raised only where loose records enter the engine. The
//! calculators themselves never fail on empty or unmatched input.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating transaction records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Inventory quantity cannot be negative.
    #[error("Line quantity cannot be negative: {0}")]
    NegativeQuantity(Decimal),

    /// Line names both an account and a stock item.
    #[error("Line must reference either an account or an item, not both")]
    AmbiguousLine,

    /// Line names neither an account nor a stock item.
    #[error("Line must reference an account or an item")]
    EmptyLine,

    /// Inventory line has no quantity.
    #[error("Inventory line for item '{0}' has no quantity")]
    MissingQuantity(String),

    /// A line inside a transaction record failed validation.
    #[error("Invalid line {index} in transaction '{number}': {source}")]
    InvalidLine {
        /// Voucher number of the offending transaction.
        number: String,
        /// Zero-based line index.
        index: usize,
        /// Underlying line error.
        #[source]
        source: Box<LedgerError>,
    },
}

impl From<LedgerError> for khata_shared::AppError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}
