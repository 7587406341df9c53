//! Period movement through an account.
//!
//! Flow accounts (income, expense) have no meaningful balance across
//! reporting periods, only a movement. This calculator sums the signed
//! deltas inside a window and has no notion of a starting balance.

use khata_shared::LinePolicy;
use khata_shared::types::Balance;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Transaction;
use crate::classify::NaturalClass;
use crate::fiscal::DateRange;

/// Debit and credit flow through an account within a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodMovement {
    /// Gross debits in the window.
    pub debit: Decimal,
    /// Gross credits in the window.
    pub credit: Decimal,
    /// Class of the account, used for orientation.
    pub class: NaturalClass,
}

impl PeriodMovement {
    /// Net signed movement (positive = Debit).
    #[must_use]
    pub fn signed(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Net movement, positive in the class's normal direction.
    #[must_use]
    pub fn oriented(&self) -> Decimal {
        self.class.orient(self.signed())
    }

    /// Net movement in (magnitude, direction) form.
    #[must_use]
    pub fn balance(&self) -> Balance {
        Balance::from_signed(self.signed())
    }
}

/// Sums line deltas inside an inclusive date window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodMovementCalculator {
    policy: LinePolicy,
}

impl PeriodMovementCalculator {
    /// Creates a calculator with the given line policy.
    #[must_use]
    pub const fn new(policy: LinePolicy) -> Self {
        Self { policy }
    }

    /// Movement through `account` for transactions dated within `range`.
    #[must_use]
    pub fn movement<'a>(
        &self,
        transactions: impl IntoIterator<Item = &'a Transaction>,
        account: &str,
        class: NaturalClass,
        range: DateRange,
    ) -> PeriodMovement {
        let (debit, credit) = transactions
            .into_iter()
            .filter(|tx| range.contains(tx.date))
            .map(|tx| tx.sides_for(account, self.policy))
            .fold((Decimal::ZERO, Decimal::ZERO), |(dr, cr), (d, c)| {
                (dr + d, cr + c)
            });

        PeriodMovement {
            debit,
            credit,
            class,
        }
    }
}
