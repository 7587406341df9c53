//! Report error types.

use thiserror::Error;

use crate::fiscal::PeriodError;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Account name is not in the supplied collection.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Invalid reporting period.
    #[error(transparent)]
    Period(#[from] PeriodError),
}

impl From<ReportError> for khata_shared::AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            ReportError::Period(_) => Self::Validation(err.to_string()),
        }
    }
}
