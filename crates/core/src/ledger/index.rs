//! Account and item lookup over a transaction snapshot.

use std::collections::HashMap;

use super::types::{Line, Transaction};

/// Maps account and item names to the transactions that reference them.
///
/// Built once per snapshot so per-account work scans only that account's
/// transactions instead of the full collection. Each transaction appears at
/// most once per name, in input order.
#[derive(Debug, Default)]
pub struct TransactionIndex<'a> {
    by_account: HashMap<&'a str, Vec<&'a Transaction>>,
    by_item: HashMap<&'a str, Vec<&'a Transaction>>,
    len: usize,
}

impl<'a> TransactionIndex<'a> {
    /// Indexes a snapshot.
    #[must_use]
    pub fn build(transactions: &'a [Transaction]) -> Self {
        let mut index = Self {
            len: transactions.len(),
            ..Self::default()
        };

        for tx in transactions {
            for line in &tx.lines {
                let (map, name) = match line {
                    Line::Ledger(l) => (&mut index.by_account, l.account.as_str()),
                    Line::Inventory(l) => (&mut index.by_item, l.item.as_str()),
                };
                let entries = map.entry(name).or_default();
                if entries.last().is_none_or(|last| !std::ptr::eq(*last, tx)) {
                    entries.push(tx);
                }
            }
        }

        index
    }

    /// Transactions referencing `account`.
    #[must_use]
    pub fn for_account(&self, account: &str) -> &[&'a Transaction] {
        self.by_account.get(account).map(Vec::as_slice).unwrap_or_default()
    }

    /// Transactions moving `item`.
    #[must_use]
    pub fn for_item(&self, item: &str) -> &[&'a Transaction] {
        self.by_item.get(item).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every account name referenced by a ledger line.
    pub fn account_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.by_account.keys().copied()
    }

    /// Number of indexed transactions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the snapshot was empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}
