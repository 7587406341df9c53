//! Stock items and point-in-time stock valuation.

pub mod error;
pub mod types;
pub mod valuation;

pub use error::InventoryError;
pub use types::{StockItem, StockPosition, StockRegister, StockRegisterRow};
pub use valuation::StockValuationReconciler;
