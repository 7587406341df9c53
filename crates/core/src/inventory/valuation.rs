//! Point-in-time stock positions.
//!
//! Items store only their live closing quantity and value. Past positions
//! are recovered the same way account balances are: inventory lines dated
//! after the cutoff are reversed, same-day lines stay included.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{StockItem, StockPosition, StockRegister, StockRegisterRow};
use crate::fiscal::DateRange;
use crate::ledger::{StockMovement, Transaction, TransactionIndex};

/// Reverses later inventory movements out of live item figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockValuationReconciler;

impl StockValuationReconciler {
    /// Position of `item` as of `cutoff`, inclusive of same-day movements.
    #[must_use]
    pub fn as_of<'a>(
        item: &StockItem,
        transactions: impl IntoIterator<Item = &'a Transaction>,
        cutoff: NaiveDate,
    ) -> StockPosition {
        transactions
            .into_iter()
            .filter(|tx| tx.date > cutoff)
            .filter_map(|tx| tx.stock_delta_for(&item.name))
            .fold(item.position(), StockPosition::unapply)
    }

    /// Position of `item` at the start of `date`, before any of its movements.
    #[must_use]
    pub fn before<'a>(
        item: &StockItem,
        transactions: impl IntoIterator<Item = &'a Transaction>,
        date: NaiveDate,
    ) -> StockPosition {
        transactions
            .into_iter()
            .filter(|tx| tx.date >= date)
            .filter_map(|tx| tx.stock_delta_for(&item.name))
            .fold(item.position(), StockPosition::unapply)
    }

    /// Movement register of `item` over `range`.
    #[must_use]
    pub fn register<'a>(
        item: &StockItem,
        transactions: impl IntoIterator<Item = &'a Transaction>,
        range: DateRange,
    ) -> StockRegister {
        let relevant: Vec<&Transaction> = transactions
            .into_iter()
            .filter(|tx| tx.moves_item(&item.name))
            .collect();

        debug!(item = %item.name, %range, transactions = relevant.len(), "Building stock register");

        let closing = Self::as_of(item, relevant.iter().copied(), range.end());

        let mut in_period: Vec<&Transaction> = relevant
            .into_iter()
            .filter(|tx| range.contains(tx.date))
            .collect();
        in_period.sort_by_key(|tx| tx.date);

        let opening = in_period
            .iter()
            .filter_map(|tx| tx.stock_delta_for(&item.name))
            .fold(closing, StockPosition::unapply);

        let mut position = opening;
        let mut inward = StockPosition::default();
        let mut outward = StockPosition::default();
        let mut rows = Vec::with_capacity(in_period.len());

        for tx in in_period {
            let (mut in_qty, mut in_val, mut out_qty, mut out_val) =
                (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
            for line in tx.inventory_lines().filter(|l| l.item == item.name) {
                match line.movement {
                    StockMovement::Inward => {
                        in_qty += line.quantity;
                        in_val += line.value;
                    }
                    StockMovement::Outward => {
                        out_qty += line.quantity;
                        out_val += line.value;
                    }
                }
            }

            position = position.apply((in_qty - out_qty, in_val - out_val));
            inward = inward.apply((in_qty, in_val));
            outward = outward.apply((out_qty, out_val));

            rows.push(StockRegisterRow {
                date: tx.date,
                transaction_id: tx.id,
                number: tx.number.clone(),
                voucher_type: tx.voucher_type,
                inward_quantity: in_qty,
                inward_value: in_val,
                outward_quantity: out_qty,
                outward_value: out_val,
                position,
            });
        }

        StockRegister {
            item: item.name.clone(),
            range,
            opening,
            rows,
            inward,
            outward,
            closing,
        }
    }

    /// Total stock value across `items` as of `date`.
    #[must_use]
    pub fn closing_stock_value(
        items: &[StockItem],
        transactions: &[Transaction],
        date: NaiveDate,
    ) -> Decimal {
        let index = TransactionIndex::build(transactions);
        items
            .iter()
            .map(|item| Self::as_of(item, index.for_item(&item.name).iter().copied(), date).value)
            .sum()
    }

    /// Total stock value across `items` at the start of `date`.
    #[must_use]
    pub fn opening_stock_value(
        items: &[StockItem],
        transactions: &[Transaction],
        date: NaiveDate,
    ) -> Decimal {
        let index = TransactionIndex::build(transactions);
        items
            .iter()
            .map(|item| Self::before(item, index.for_item(&item.name).iter().copied(), date).value)
            .sum()
    }
}
