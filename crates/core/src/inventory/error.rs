//! Inventory error types.

use thiserror::Error;

/// Errors raised by inventory lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Item name is not in the supplied collection.
    #[error("Stock item not found: {0}")]
    ItemNotFound(String),
}

impl From<InventoryError> for khata_shared::AppError {
    fn from(err: InventoryError) -> Self {
        Self::NotFound(err.to_string())
    }
}
