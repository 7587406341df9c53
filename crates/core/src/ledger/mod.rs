//! Accounts, transactions and balance reconstruction.
//!
//! This module implements the ledger side of the engine:
//! - Domain types and boundary validation of loose records
//! - Point-in-time balance reconstruction
//! - Period movement
//! - Account and item indexing over a snapshot
//! - Integrity validation against a full replay

pub mod balance;
pub mod error;
pub mod index;
pub mod movement;
pub mod reconcile;
pub mod types;

#[cfg(test)]
mod balance_props;

pub use balance::{BalanceReconstructor, RunningBalance};
pub use error::LedgerError;
pub use index::TransactionIndex;
pub use movement::{PeriodMovement, PeriodMovementCalculator};
pub use reconcile::{
    IntegrityReport, OrphanLine, Reconciler, Reconciliation, RepeatedAccount,
    UnbalancedTransaction, UnknownGroup,
};
pub use types::{
    Account, InventoryLine, LedgerLine, Line, LineRecord, StockMovement, Transaction,
    TransactionRecord, VoucherType, credit, debit, stock, validate_records,
};
