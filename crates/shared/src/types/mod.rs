//! Common value types used across the engine.

pub mod balance;
pub mod id;

pub use balance::{Balance, BalanceError, BalanceRecord, Direction};
pub use id::*;
