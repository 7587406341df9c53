//! Point-in-time balance reconstruction.
//!
//! Accounts store only their live balance. A past balance is recovered by
//! undoing every transaction dated after the cutoff:
//!
//! ```text
//! current = as_of(cutoff) + Σ deltas(date > cutoff)
//! as_of(cutoff) = current − Σ deltas(date > cutoff)
//! ```
//!
//! A transaction dated exactly on the cutoff is already part of the as-of
//! balance and is not reversed.

use chrono::NaiveDate;
use khata_shared::LinePolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Transaction;

/// Reverses later transactions out of a live signed balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceReconstructor {
    policy: LinePolicy,
}

impl BalanceReconstructor {
    /// Creates a reconstructor with the given line policy.
    #[must_use]
    pub const fn new(policy: LinePolicy) -> Self {
        Self { policy }
    }

    /// Line policy in effect.
    #[must_use]
    pub const fn policy(&self) -> LinePolicy {
        self.policy
    }

    /// Signed balance of `account` as of `cutoff`, inclusive of same-day
    /// activity.
    ///
    /// Empty or unmatched transaction sets return `current_signed` unchanged.
    #[must_use]
    pub fn as_of<'a>(
        &self,
        current_signed: Decimal,
        transactions: impl IntoIterator<Item = &'a Transaction>,
        account: &str,
        cutoff: NaiveDate,
    ) -> Decimal {
        current_signed - self.future_deltas(transactions, account, cutoff)
    }

    /// Sum of signed deltas on `account` from transactions dated strictly
    /// after `cutoff`.
    #[must_use]
    pub fn future_deltas<'a>(
        &self,
        transactions: impl IntoIterator<Item = &'a Transaction>,
        account: &str,
        cutoff: NaiveDate,
    ) -> Decimal {
        transactions
            .into_iter()
            .filter(|tx| tx.date > cutoff)
            .filter_map(|tx| tx.signed_delta_for(account, self.policy))
            .sum()
    }

    /// Replays every transaction forward from `opening_signed`.
    #[must_use]
    pub fn replay<'a>(
        &self,
        opening_signed: Decimal,
        transactions: impl IntoIterator<Item = &'a Transaction>,
        account: &str,
    ) -> Decimal {
        opening_signed
            + transactions
                .into_iter()
                .filter_map(|tx| tx.signed_delta_for(account, self.policy))
                .sum::<Decimal>()
    }
}

/// Running balance across consecutive rows of a statement or register.
///
/// Invariants:
/// - `current_balance[N] = previous_balance[N] + change[N]`
/// - `previous_balance[N] = current_balance[N-1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Position in the sequence, starting at 1.
    pub sequence: u64,
    /// Signed balance before this row.
    pub previous_balance: Decimal,
    /// Signed balance after this row.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// First row starting from `opening`.
    #[must_use]
    pub fn first(opening: Decimal, change: Decimal) -> Self {
        Self {
            sequence: 1,
            previous_balance: opening,
            current_balance: opening + change,
        }
    }

    /// Row following `previous`.
    #[must_use]
    pub fn next(previous: &Self, change: Decimal) -> Self {
        Self {
            sequence: previous.sequence + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + change,
        }
    }

    /// Folds a sequence of changes into running balances.
    #[must_use]
    pub fn accumulate(opening: Decimal, changes: impl IntoIterator<Item = Decimal>) -> Vec<Self> {
        let mut rows: Vec<Self> = Vec::new();
        for change in changes {
            let row = match rows.last() {
                Some(prev) => Self::next(prev, change),
                None => Self::first(opening, change),
            };
            rows.push(row);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{credit, debit};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cash_worked_example() {
        let tx = Transaction::new(
            "R-1",
            date(2024, 6, 1),
            vec![debit("Cash", dec!(200)), credit("Sales", dec!(200))],
        );
        let reconstructor = BalanceReconstructor::default();

        assert_eq!(
            reconstructor.as_of(dec!(1000), [&tx], "Cash", date(2024, 5, 1)),
            dec!(800)
        );
    }

    #[test]
    fn test_same_day_is_not_reversed() {
        let tx = Transaction::new(
            "R-1",
            date(2024, 6, 1),
            vec![debit("Cash", dec!(200)), credit("Sales", dec!(200))],
        );
        let reconstructor = BalanceReconstructor::default();

        assert_eq!(
            reconstructor.as_of(dec!(1000), [&tx], "Cash", date(2024, 6, 1)),
            dec!(1000)
        );
        assert_eq!(
            reconstructor.as_of(dec!(1000), [&tx], "Cash", date(2024, 5, 31)),
            dec!(800)
        );
    }

    #[test]
    fn test_empty_and_unmatched() {
        let reconstructor = BalanceReconstructor::default();
        assert_eq!(
            reconstructor.as_of(dec!(-250), std::iter::empty(), "Cash", date(2024, 1, 1)),
            dec!(-250)
        );

        let tx = Transaction::new(
            "J-1",
            date(2024, 6, 1),
            vec![debit("Rent", dec!(10)), credit("Bank", dec!(10))],
        );
        assert_eq!(
            reconstructor.as_of(dec!(-250), [&tx], "Cash", date(2024, 1, 1)),
            dec!(-250)
        );
    }

    #[test]
    fn test_credit_reversal_can_flip_direction() {
        // Cash was overdrawn by a later payment of 300 from a balance of 100.
        let tx = Transaction::new(
            "P-1",
            date(2024, 6, 1),
            vec![debit("Rent", dec!(300)), credit("Cash", dec!(300))],
        );
        let reconstructor = BalanceReconstructor::default();

        assert_eq!(
            reconstructor.as_of(dec!(-200), [&tx], "Cash", date(2024, 5, 1)),
            dec!(100)
        );
    }

    #[test]
    fn test_line_policy_changes_reversal() {
        let tx = Transaction::new(
            "J-1",
            date(2024, 6, 1),
            vec![
                debit("Cash", dec!(100)),
                debit("Cash", dec!(50)),
                credit("Capital", dec!(150)),
            ],
        );

        let sum_all = BalanceReconstructor::new(LinePolicy::SumAll);
        let first = BalanceReconstructor::new(LinePolicy::FirstMatch);
        assert_eq!(sum_all.as_of(dec!(150), [&tx], "Cash", date(2024, 1, 1)), dec!(0));
        assert_eq!(first.as_of(dec!(150), [&tx], "Cash", date(2024, 1, 1)), dec!(50));
    }

    #[test]
    fn test_replay_from_opening() {
        let txs = vec![
            Transaction::new(
                "R-1",
                date(2024, 4, 2),
                vec![debit("Cash", dec!(500)), credit("Sales", dec!(500))],
            ),
            Transaction::new(
                "P-1",
                date(2024, 4, 3),
                vec![debit("Rent", dec!(120)), credit("Cash", dec!(120))],
            ),
        ];
        let reconstructor = BalanceReconstructor::default();
        assert_eq!(reconstructor.replay(dec!(1000), &txs, "Cash"), dec!(1380));
    }

    #[test]
    fn test_running_balance_accumulate() {
        let rows = RunningBalance::accumulate(dec!(100), [dec!(50), dec!(-30), dec!(0)]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].previous_balance, dec!(100));
        assert_eq!(rows[0].current_balance, dec!(150));
        assert_eq!(rows[1].current_balance, dec!(120));
        assert_eq!(rows[2].sequence, 3);
        assert_eq!(rows[2].current_balance, dec!(120));
    }

    // ========================================================================
    // Running Balance Consistency
    // ========================================================================

    fn change_strategy() -> impl Strategy<Value = Decimal> {
        (-100_000i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_running_balance_chain(
            opening in change_strategy(),
            changes in prop::collection::vec(change_strategy(), 1..=50)
        ) {
            let rows = RunningBalance::accumulate(opening, changes.iter().copied());

            prop_assert_eq!(rows[0].previous_balance, opening);
            for pair in rows.windows(2) {
                prop_assert_eq!(pair[1].previous_balance, pair[0].current_balance);
                prop_assert_eq!(pair[1].sequence, pair[0].sequence + 1);
            }
            for (row, change) in rows.iter().zip(&changes) {
                prop_assert_eq!(row.current_balance, row.previous_balance + *change);
            }

            let total: Decimal = changes.iter().copied().sum();
            prop_assert_eq!(rows.last().unwrap().current_balance, opening + total);
        }
    }
}
