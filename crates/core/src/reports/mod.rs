//! Financial report generation.
//!
//! This module provides pure report logic on top of the ledger:
//! - Group aggregation (current, as-on, period)
//! - Ledger statements
//! - Trial Balance
//! - Profit and Loss
//! - Ratio Analysis

pub mod aggregate;
pub mod error;
pub mod profit_loss;
pub mod ratios;
pub mod statement;
pub mod trial_balance;
pub mod types;


pub use aggregate::{GroupAggregator, total_of};
pub use error::ReportError;
pub use profit_loss::ProfitAndLoss;
pub use ratios::{Ratio, RatioAnalysis, RatioInputs};
pub use statement::{LedgerStatementBuilder, contra_for};
pub use types::*;
