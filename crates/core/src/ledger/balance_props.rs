//! Property-based tests for balance reconstruction.
//!
//! - Property 1: Idempotence
//! - Property 2: No-future round trip
//! - Property 3: Same-day inclusion
//! - Property 4: Reversal agrees with forward replay
//! - Property 5: Movement equals the balance difference across a window

use chrono::{Days, NaiveDate};
use khata_shared::LinePolicy;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::BalanceReconstructor;
use super::movement::PeriodMovementCalculator;
use super::types::{Transaction, credit, debit};
use crate::classify::NaturalClass;
use crate::fiscal::DateRange;

const ACCOUNTS: [&str; 4] = ["Cash", "Bank", "Sales", "Rent"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a day offset within one year.
fn day_offset() -> impl Strategy<Value = u64> {
    0u64..365
}

/// Strategy to generate a balanced two-line transaction between distinct accounts.
fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (day_offset(), 0usize..4, 1usize..4, positive_amount()).prop_map(|(offset, dr, shift, amount)| {
        let cr = (dr + shift) % ACCOUNTS.len();
        Transaction::new(
            format!("V-{offset}"),
            base_date() + Days::new(offset),
            vec![debit(ACCOUNTS[dr], amount), credit(ACCOUNTS[cr], amount)],
        )
    })
}

fn transactions_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(transaction_strategy(), 0..40)
}

fn signed_balance() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn policy_strategy() -> impl Strategy<Value = LinePolicy> {
    prop_oneof![Just(LinePolicy::SumAll), Just(LinePolicy::FirstMatch)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ===== Property 1: Idempotence =====
    #[test]
    fn prop_as_of_is_idempotent(
        current in signed_balance(),
        txs in transactions_strategy(),
        cutoff in day_offset(),
        policy in policy_strategy(),
    ) {
        let reconstructor = BalanceReconstructor::new(policy);
        let cutoff = base_date() + Days::new(cutoff);

        let first = reconstructor.as_of(current, &txs, "Cash", cutoff);
        let second = reconstructor.as_of(current, &txs, "Cash", cutoff);
        prop_assert_eq!(first, second);
    }

    // ===== Property 2: No-future round trip =====
    #[test]
    fn prop_no_future_round_trip(
        current in signed_balance(),
        txs in transactions_strategy(),
    ) {
        let today = txs.iter().map(|tx| tx.date).max().unwrap_or_else(base_date);
        let reconstructor = BalanceReconstructor::default();

        for account in ACCOUNTS {
            prop_assert_eq!(reconstructor.as_of(current, &txs, account, today), current);
        }
    }

    // ===== Property 3: Same-day inclusion =====
    #[test]
    fn prop_same_day_transaction_is_included(
        current in signed_balance(),
        tx in transaction_strategy(),
    ) {
        let reconstructor = BalanceReconstructor::default();
        let account = tx.ledger_lines().next().map(|l| l.account.clone()).unwrap();
        let delta = tx.signed_delta_for(&account, LinePolicy::SumAll).unwrap();

        prop_assert_eq!(reconstructor.as_of(current, [&tx], &account, tx.date), current);
        let day_before = tx.date.pred_opt().unwrap();
        prop_assert_eq!(reconstructor.as_of(current, [&tx], &account, day_before), current - delta);
    }

    // ===== Property 4: Reversal agrees with forward replay =====
    #[test]
    fn prop_reversal_matches_replay(
        opening in signed_balance(),
        txs in transactions_strategy(),
        cutoff in day_offset(),
    ) {
        let reconstructor = BalanceReconstructor::default();
        let cutoff = base_date() + Days::new(cutoff);

        for account in ACCOUNTS {
            let live = reconstructor.replay(opening, &txs, account);
            let up_to_cutoff = txs.iter().filter(|tx| tx.date <= cutoff);
            let expected = reconstructor.replay(opening, up_to_cutoff, account);
            prop_assert_eq!(reconstructor.as_of(live, &txs, account, cutoff), expected);
        }
    }

    // ===== Property 5: Movement equals balance difference =====
    #[test]
    fn prop_movement_is_balance_difference(
        current in signed_balance(),
        txs in transactions_strategy(),
        start in 1u64..365,
        length in 0u64..120,
    ) {
        let start = base_date() + Days::new(start);
        let end = start + Days::new(length);
        let range = DateRange::new(start, end).unwrap();
        let reconstructor = BalanceReconstructor::default();
        let calculator = PeriodMovementCalculator::default();

        for account in ACCOUNTS {
            let closing = reconstructor.as_of(current, &txs, account, end);
            let opening = reconstructor.as_of(current, &txs, account, start.pred_opt().unwrap());
            let movement = calculator.movement(&txs, account, NaturalClass::Asset, range);
            prop_assert_eq!(movement.signed(), closing - opening);
        }
    }
}
