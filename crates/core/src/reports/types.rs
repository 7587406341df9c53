//! Report data types.

use chrono::NaiveDate;
use khata_shared::types::{Balance, Direction, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classify::NaturalClass;
use crate::fiscal::DateRange;
use crate::ledger::VoucherType;

/// Which figure each account contributes to an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Scope {
    /// Live balances as stored.
    Current,
    /// Balances reconstructed as of a date (inclusive).
    AsOn {
        /// Cutoff date.
        date: NaiveDate,
    },
    /// Movement within a date range.
    Period {
        /// Inclusive range.
        range: DateRange,
    },
}

/// One account's figure inside a group summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// Account name.
    pub account: String,
    /// Signed figure for the scope (positive = Debit).
    pub signed: Decimal,
    /// Same figure in (magnitude, direction) form.
    pub balance: Balance,
}

/// Aggregated figure for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group name.
    pub group: String,
    /// Natural class of the group.
    pub class: NaturalClass,
    /// Sum of member figures, positive in the class's normal direction.
    pub total: Decimal,
    /// Member accounts, sorted by name.
    pub members: Vec<MemberBalance>,
}

impl GroupSummary {
    /// Group total in (magnitude, direction) form.
    #[must_use]
    pub fn balance(&self) -> Balance {
        Balance::from_signed(self.signed_total())
    }

    /// Sum of member figures as a signed value (positive = Debit).
    #[must_use]
    pub fn signed_total(&self) -> Decimal {
        self.class.orient(self.total)
    }
}

/// Grand totals per natural class, each positive in its normal direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTotals {
    /// Asset-class total (debit-positive).
    pub asset: Decimal,
    /// Liability-class total (credit-positive).
    pub liability: Decimal,
    /// Income-class total (credit-positive).
    pub income: Decimal,
    /// Expense-class total (debit-positive).
    pub expense: Decimal,
}

impl ClassTotals {
    /// Sums group totals per class.
    #[must_use]
    pub fn from_summaries(summaries: &[GroupSummary]) -> Self {
        summaries.iter().fold(Self::default(), |mut totals, summary| {
            *totals.slot_mut(summary.class) += summary.total;
            totals
        })
    }

    /// Total for one class.
    #[must_use]
    pub const fn get(&self, class: NaturalClass) -> Decimal {
        match class {
            NaturalClass::Asset => self.asset,
            NaturalClass::Liability => self.liability,
            NaturalClass::Income => self.income,
            NaturalClass::Expense => self.expense,
        }
    }

    fn slot_mut(&mut self, class: NaturalClass) -> &mut Decimal {
        match class {
            NaturalClass::Asset => &mut self.asset,
            NaturalClass::Liability => &mut self.liability,
            NaturalClass::Income => &mut self.income,
            NaturalClass::Expense => &mut self.expense,
        }
    }

    /// Debit side of the accounting identity.
    #[must_use]
    pub fn debit_side(&self) -> Decimal {
        self.asset + self.expense
    }

    /// Credit side of the accounting identity.
    #[must_use]
    pub fn credit_side(&self) -> Decimal {
        self.liability + self.income
    }

    /// `asset + expense == liability + income`.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit_side() == self.credit_side()
    }
}

/// One row of a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account name.
    pub account: String,
    /// Group name.
    pub group: String,
    /// Natural class of the group.
    pub class: NaturalClass,
    /// Debit column (zero when the balance is credit).
    pub debit: Decimal,
    /// Credit column (zero when the balance is debit).
    pub credit: Decimal,
}

/// Trial balance as on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Cutoff date.
    pub as_on: NaiveDate,
    /// Rows ordered by class, group, account.
    pub rows: Vec<TrialBalanceRow>,
    /// Debit column total.
    pub total_debit: Decimal,
    /// Credit column total.
    pub total_credit: Decimal,
    /// Per-class totals.
    pub class_totals: ClassTotals,
    /// Whether the debit and credit columns agree.
    pub is_balanced: bool,
}

/// Counter-party label for a statement row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contra {
    /// Exactly one other account.
    Single {
        /// Account name.
        account: String,
    },
    /// Several other accounts.
    Multiple {
        /// First other account in line order.
        first: String,
        /// How many further distinct accounts there are.
        others: usize,
    },
    /// The transaction touches no other account.
    None,
}

impl std::fmt::Display for Contra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single { account } => write!(f, "{account}"),
            Self::Multiple { first, others } => write!(f, "{first} (+{others} more)"),
            Self::None => Ok(()),
        }
    }
}

/// One transaction in a ledger statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Transaction date.
    pub date: NaiveDate,
    /// Transaction id.
    pub transaction_id: TransactionId,
    /// Voucher number.
    pub number: String,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Counter-party label.
    pub contra: Contra,
    /// Debit posted to the account.
    pub debit: Decimal,
    /// Credit posted to the account.
    pub credit: Decimal,
    /// Running balance after this row (signed).
    pub running_signed: Decimal,
    /// Running balance after this row.
    pub running: Balance,
}

/// Chronological statement of one account over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatement {
    /// Account name.
    pub account: String,
    /// Statement range.
    pub range: DateRange,
    /// Balance immediately before the range (signed).
    pub opening_signed: Decimal,
    /// Rows in date order.
    pub rows: Vec<StatementRow>,
    /// Sum of row debits.
    pub total_debit: Decimal,
    /// Sum of row credits.
    pub total_credit: Decimal,
    /// Balance at the end of the range (signed).
    pub closing_signed: Decimal,
}

impl LedgerStatement {
    /// Opening balance in (magnitude, direction) form.
    #[must_use]
    pub fn opening(&self) -> Balance {
        Balance::from_signed(self.opening_signed)
    }

    /// Closing balance in (magnitude, direction) form.
    #[must_use]
    pub fn closing(&self) -> Balance {
        Balance::from_signed(self.closing_signed)
    }

    /// Net side of the period's activity, if any.
    #[must_use]
    pub fn net_direction(&self) -> Option<Direction> {
        match (self.total_debit - self.total_credit).cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => Some(Direction::Debit),
            std::cmp::Ordering::Less => Some(Direction::Credit),
            std::cmp::Ordering::Equal => None,
        }
    }
}
