//! Inventory data types.

use chrono::NaiveDate;
use khata_shared::types::TransactionId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::DateRange;
use crate::ledger::VoucherType;
use crate::ledger::types::trimmed_name;

/// A stock item master with its live closing figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    /// Unique item name, trimmed on load.
    #[serde(deserialize_with = "trimmed_name")]
    pub name: String,
    /// Unit of measure.
    #[serde(default)]
    pub unit: String,
    /// Stock group.
    #[serde(default)]
    pub group: String,
    /// Live closing quantity.
    pub closing_quantity: Decimal,
    /// Live closing value.
    pub closing_value: Decimal,
}

impl StockItem {
    /// Creates an item.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        closing_quantity: Decimal,
        closing_value: Decimal,
    ) -> Self {
        let name: String = name.into();
        Self {
            name: name.trim().to_string(),
            unit: unit.into(),
            group: String::new(),
            closing_quantity,
            closing_value,
        }
    }

    /// Live position.
    #[must_use]
    pub const fn position(&self) -> StockPosition {
        StockPosition {
            quantity: self.closing_quantity,
            value: self.closing_value,
        }
    }
}

/// Quantity and value held at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPosition {
    /// Quantity on hand.
    pub quantity: Decimal,
    /// Value of quantity on hand.
    pub value: Decimal,
}

impl StockPosition {
    /// Position after applying a signed (quantity, value) change.
    #[must_use]
    pub fn apply(self, (quantity, value): (Decimal, Decimal)) -> Self {
        Self {
            quantity: self.quantity + quantity,
            value: self.value + value,
        }
    }

    /// Position before a signed (quantity, value) change.
    #[must_use]
    pub fn unapply(self, (quantity, value): (Decimal, Decimal)) -> Self {
        Self {
            quantity: self.quantity - quantity,
            value: self.value - value,
        }
    }

    /// Average value per unit, `None` when nothing is on hand.
    #[must_use]
    pub fn average_rate(&self) -> Option<Decimal> {
        if self.quantity.is_zero() {
            None
        } else {
            Some(self.value / self.quantity)
        }
    }
}

/// One transaction in a stock register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRegisterRow {
    /// Transaction date.
    pub date: NaiveDate,
    /// Transaction id.
    pub transaction_id: TransactionId,
    /// Voucher number.
    pub number: String,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Quantity received.
    pub inward_quantity: Decimal,
    /// Value received.
    pub inward_value: Decimal,
    /// Quantity issued.
    pub outward_quantity: Decimal,
    /// Value issued.
    pub outward_value: Decimal,
    /// Position after this row.
    pub position: StockPosition,
}

/// Movement register of one item over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRegister {
    /// Item name.
    pub item: String,
    /// Register range.
    pub range: DateRange,
    /// Position immediately before the range.
    pub opening: StockPosition,
    /// Rows in date order.
    pub rows: Vec<StockRegisterRow>,
    /// Total inward quantity and value.
    pub inward: StockPosition,
    /// Total outward quantity and value.
    pub outward: StockPosition,
    /// Position at the end of the range.
    pub closing: StockPosition,
}
