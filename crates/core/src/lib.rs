//! Balance-reconstruction engine for Khata.
//!
//! This crate contains pure bookkeeping logic with no storage, web, or UI
//! dependencies. Accounts store only a live balance; every historical figure
//! is recomputed on demand from that balance and the transaction history.
//!
//! # Modules
//!
//! - `classify` - Group to natural-class mapping
//! - `fiscal` - Reporting periods and financial years
//! - `ledger` - Accounts, transactions, balance reconstruction, integrity checks
//! - `inventory` - Stock items and point-in-time stock valuation
//! - `reports` - Group aggregation, statements, trial balance, P&L, ratios
//! - `session` - Per-company facade

pub mod classify;
pub mod fiscal;
pub mod inventory;
pub mod ledger;
pub mod reports;
pub mod session;

pub use session::{CompanySession, Snapshot};
