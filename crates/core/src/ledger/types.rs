//! Ledger domain types: accounts, transactions and their lines.
//!
//! Storage hands transactions over as loose [`TransactionRecord`]s. They are
//! validated into [`Transaction`]s once, at the boundary, so the calculators
//! can pattern-match on [`Line`] instead of probing optional fields.

use chrono::NaiveDate;
use khata_shared::LinePolicy;
use khata_shared::types::{Balance, Direction, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::LedgerError;

/// Deserializes a master name with surrounding whitespace removed, so it
/// joins with lines whose names are trimmed the same way.
pub(crate) fn trimmed_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|name| name.trim().to_string())
}

/// An account (ledger) master.
///
/// Accounts are joined to transaction lines by `name`, not by a surrogate id.
/// Names are trimmed on load; balances with a negative magnitude are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account name.
    #[serde(deserialize_with = "trimmed_name")]
    pub name: String,
    /// Group the account belongs to.
    pub group: String,
    /// Optional free-form category.
    #[serde(default)]
    pub category: Option<String>,
    /// Balance recorded when the master was created.
    #[serde(default)]
    pub opening_balance: Balance,
    /// Live balance, kept up to date by the posting layer.
    pub balance: Balance,
}

impl Account {
    /// Creates an account with a zero opening balance.
    #[must_use]
    pub fn new(name: impl Into<String>, group: impl Into<String>, balance: Balance) -> Self {
        let name: String = name.into();
        Self {
            name: name.trim().to_string(),
            group: group.into(),
            category: None,
            opening_balance: Balance::ZERO,
            balance,
        }
    }

    /// Sets the opening balance.
    #[must_use]
    pub fn with_opening(mut self, opening: Balance) -> Self {
        self.opening_balance = opening;
        self
    }

    /// Live balance as a signed value (positive = Debit).
    #[must_use]
    pub fn current_signed(&self) -> Decimal {
        self.balance.signed()
    }

    /// Opening balance as a signed value (positive = Debit).
    #[must_use]
    pub fn opening_signed(&self) -> Decimal {
        self.opening_balance.signed()
    }
}

/// Voucher type tag.
///
/// Carried for display and filtering; it never changes balance math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    /// Cash or bank payment.
    Payment,
    /// Cash or bank receipt.
    Receipt,
    /// Transfer between cash and bank.
    Contra,
    /// General journal.
    #[default]
    Journal,
    /// Sales invoice.
    Sales,
    /// Purchase invoice.
    Purchase,
    /// Sales return.
    CreditNote,
    /// Purchase return.
    DebitNote,
    /// Stock-only adjustment.
    StockJournal,
}

/// Direction of an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockMovement {
    /// Goods coming in.
    Inward,
    /// Goods going out.
    Outward,
}

impl StockMovement {
    /// Positive for inward, negative for outward.
    #[must_use]
    pub fn sign(self, magnitude: Decimal) -> Decimal {
        match self {
            Self::Inward => magnitude,
            Self::Outward => -magnitude,
        }
    }
}

impl From<Direction> for StockMovement {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Debit => Self::Inward,
            Direction::Credit => Self::Outward,
        }
    }
}

/// A line posting an amount to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Account name.
    pub account: String,
    /// Debit or Credit.
    pub direction: Direction,
    /// Non-negative amount.
    pub amount: Decimal,
}

impl LedgerLine {
    /// Signed delta of this line (positive = Debit).
    #[must_use]
    pub fn signed(&self) -> Decimal {
        self.direction.sign(self.amount)
    }
}

/// A line moving stock of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    /// Stock item name.
    pub item: String,
    /// Inward or outward.
    pub movement: StockMovement,
    /// Non-negative quantity.
    pub quantity: Decimal,
    /// Non-negative value.
    pub value: Decimal,
}

impl InventoryLine {
    /// Signed quantity (positive = inward).
    #[must_use]
    pub fn signed_quantity(&self) -> Decimal {
        self.movement.sign(self.quantity)
    }

    /// Signed value (positive = inward).
    #[must_use]
    pub fn signed_value(&self) -> Decimal {
        self.movement.sign(self.value)
    }
}

/// A validated transaction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line {
    /// Posts to an account.
    Ledger(LedgerLine),
    /// Moves stock. Never touches account balances.
    Inventory(InventoryLine),
}

/// Loose line shape as produced by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Account name, for ledger lines.
    #[serde(default)]
    pub account: Option<String>,
    /// Item name, for inventory lines.
    #[serde(default)]
    pub item: Option<String>,
    /// Debit/Credit. For inventory lines Debit means inward.
    pub direction: Direction,
    /// Amount or stock value.
    #[serde(default)]
    pub amount: Decimal,
    /// Quantity, required for inventory lines.
    #[serde(default)]
    pub quantity: Option<Decimal>,
}

fn non_blank(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

impl TryFrom<LineRecord> for Line {
    type Error = LedgerError;

    fn try_from(record: LineRecord) -> Result<Self, Self::Error> {
        if record.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(record.amount));
        }

        match (non_blank(record.account), non_blank(record.item)) {
            (Some(account), None) => Ok(Self::Ledger(LedgerLine {
                account,
                direction: record.direction,
                amount: record.amount,
            })),
            (None, Some(item)) => {
                let quantity = record
                    .quantity
                    .ok_or_else(|| LedgerError::MissingQuantity(item.clone()))?;
                if quantity < Decimal::ZERO {
                    return Err(LedgerError::NegativeQuantity(quantity));
                }
                Ok(Self::Inventory(InventoryLine {
                    item,
                    movement: record.direction.into(),
                    quantity,
                    value: record.amount,
                }))
            }
            (Some(_), Some(_)) => Err(LedgerError::AmbiguousLine),
            (None, None) => Err(LedgerError::EmptyLine),
        }
    }
}

/// Loose transaction shape as produced by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Id; generated when absent.
    #[serde(default)]
    pub id: Option<TransactionId>,
    /// Voucher number shown to users.
    #[serde(default)]
    pub number: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Voucher type tag.
    #[serde(default)]
    pub voucher_type: VoucherType,
    /// Unvalidated lines.
    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

/// A validated transaction (voucher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction id.
    pub id: TransactionId,
    /// Voucher number shown to users.
    pub number: String,
    /// Calendar date, no time component.
    pub date: NaiveDate,
    /// Voucher type tag.
    pub voucher_type: VoucherType,
    /// Ordered lines.
    pub lines: Vec<Line>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = LedgerError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let lines = record
            .lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                Line::try_from(line).map_err(|source| LedgerError::InvalidLine {
                    number: record.number.clone(),
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: record.id.unwrap_or_default(),
            number: record.number,
            date: record.date,
            voucher_type: record.voucher_type,
            lines,
        })
    }
}

/// Validates a batch of records, failing on the first malformed one.
///
/// # Errors
///
/// Returns the first [`LedgerError`] encountered.
pub fn validate_records(
    records: impl IntoIterator<Item = TransactionRecord>,
) -> Result<Vec<Transaction>, LedgerError> {
    records.into_iter().map(Transaction::try_from).collect()
}

impl Transaction {
    /// Creates a transaction with a fresh id.
    #[must_use]
    pub fn new(number: impl Into<String>, date: NaiveDate, lines: Vec<Line>) -> Self {
        Self {
            id: TransactionId::new(),
            number: number.into(),
            date,
            voucher_type: VoucherType::default(),
            lines,
        }
    }

    /// Sets the voucher type.
    #[must_use]
    pub fn with_voucher_type(mut self, voucher_type: VoucherType) -> Self {
        self.voucher_type = voucher_type;
        self
    }

    /// Ledger lines in order.
    pub fn ledger_lines(&self) -> impl Iterator<Item = &LedgerLine> {
        self.lines.iter().filter_map(|line| match line {
            Line::Ledger(l) => Some(l),
            Line::Inventory(_) => None,
        })
    }

    /// Inventory lines in order.
    pub fn inventory_lines(&self) -> impl Iterator<Item = &InventoryLine> {
        self.lines.iter().filter_map(|line| match line {
            Line::Inventory(l) => Some(l),
            Line::Ledger(_) => None,
        })
    }

    /// Ledger lines referencing `account`, narrowed by the line policy.
    pub fn lines_for<'a>(
        &'a self,
        account: &'a str,
        policy: LinePolicy,
    ) -> impl Iterator<Item = &'a LedgerLine> + 'a {
        let limit = match policy {
            LinePolicy::SumAll => usize::MAX,
            LinePolicy::FirstMatch => 1,
        };
        self.ledger_lines()
            .filter(move |l| l.account == account)
            .take(limit)
    }

    /// Returns true if any ledger line references `account`.
    #[must_use]
    pub fn references(&self, account: &str) -> bool {
        self.ledger_lines().any(|l| l.account == account)
    }

    /// Returns true if any inventory line references `item`.
    #[must_use]
    pub fn moves_item(&self, item: &str) -> bool {
        self.inventory_lines().any(|l| l.item == item)
    }

    /// Signed delta this transaction applies to `account`, or `None` if it
    /// does not reference the account.
    #[must_use]
    pub fn signed_delta_for(&self, account: &str, policy: LinePolicy) -> Option<Decimal> {
        self.lines_for(account, policy)
            .map(LedgerLine::signed)
            .reduce(|a, b| a + b)
    }

    /// Gross debit and credit amounts posted to `account`.
    #[must_use]
    pub fn sides_for(&self, account: &str, policy: LinePolicy) -> (Decimal, Decimal) {
        self.lines_for(account, policy)
            .fold((Decimal::ZERO, Decimal::ZERO), |(dr, cr), l| match l.direction {
                Direction::Debit => (dr + l.amount, cr),
                Direction::Credit => (dr, cr + l.amount),
            })
    }

    /// Signed (quantity, value) this transaction moves for `item`, or `None`.
    #[must_use]
    pub fn stock_delta_for(&self, item: &str) -> Option<(Decimal, Decimal)> {
        self.inventory_lines()
            .filter(|l| l.item == item)
            .map(|l| (l.signed_quantity(), l.signed_value()))
            .reduce(|(q1, v1), (q2, v2)| (q1 + q2, v1 + v2))
    }

    /// Total debit and credit across all ledger lines.
    #[must_use]
    pub fn ledger_totals(&self) -> (Decimal, Decimal) {
        self.ledger_lines()
            .fold((Decimal::ZERO, Decimal::ZERO), |(dr, cr), l| match l.direction {
                Direction::Debit => (dr + l.amount, cr),
                Direction::Credit => (dr, cr + l.amount),
            })
    }

    /// Returns true if ledger debits equal ledger credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let (debit, credit) = self.ledger_totals();
        debit == credit
    }

    /// Accounts that appear on more than one ledger line.
    #[must_use]
    pub fn repeated_accounts(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut repeated: Vec<&str> = Vec::new();
        for line in self.ledger_lines() {
            let name = line.account.as_str();
            if seen.contains(&name) {
                if !repeated.contains(&name) {
                    repeated.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        repeated
    }
}

/// Convenience constructor for a debit ledger line.
#[must_use]
pub fn debit(account: impl Into<String>, amount: Decimal) -> Line {
    Line::Ledger(LedgerLine {
        account: account.into(),
        direction: Direction::Debit,
        amount,
    })
}

/// Convenience constructor for a credit ledger line.
#[must_use]
pub fn credit(account: impl Into<String>, amount: Decimal) -> Line {
    Line::Ledger(LedgerLine {
        account: account.into(),
        direction: Direction::Credit,
        amount,
    })
}

/// Convenience constructor for an inventory line.
#[must_use]
pub fn stock(
    item: impl Into<String>,
    movement: StockMovement,
    quantity: Decimal,
    value: Decimal,
) -> Line {
    Line::Inventory(InventoryLine {
        item: item.into(),
        movement,
        quantity,
        value,
    })
}
