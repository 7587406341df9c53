//! Single-account ledger statement.
//!
//! Built entirely from the account's live balance:
//! 1. closing = balance as of the range end
//! 2. opening = closing minus every in-range delta
//! 3. rows walk forward from opening in date order
//!
//! so that `total_debit - total_credit == closing - opening` always holds.

use khata_shared::LinePolicy;
use khata_shared::types::Balance;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{Contra, LedgerStatement, StatementRow};
use crate::fiscal::DateRange;
use crate::ledger::{Account, BalanceReconstructor, RunningBalance, Transaction};

/// Builds ledger statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerStatementBuilder {
    policy: LinePolicy,
}

impl LedgerStatementBuilder {
    /// Creates a builder with the given line policy.
    #[must_use]
    pub const fn new(policy: LinePolicy) -> Self {
        Self { policy }
    }

    /// Statement of `account` over `range`.
    ///
    /// `transactions` may contain transactions for other accounts; they are
    /// skipped. Same-date transactions keep their input order.
    #[must_use]
    pub fn statement<'a>(
        &self,
        account: &Account,
        transactions: impl IntoIterator<Item = &'a Transaction>,
        range: DateRange,
    ) -> LedgerStatement {
        let name = account.name.as_str();
        let relevant: Vec<&Transaction> = transactions
            .into_iter()
            .filter(|tx| tx.references(name))
            .collect();

        debug!(account = %name, %range, transactions = relevant.len(), "Building ledger statement");

        let closing_signed = BalanceReconstructor::new(self.policy).as_of(
            account.current_signed(),
            relevant.iter().copied(),
            name,
            range.end(),
        );

        let mut in_period: Vec<&Transaction> = relevant
            .into_iter()
            .filter(|tx| range.contains(tx.date))
            .collect();

        // Walk back from closing, latest first.
        in_period.sort_by(|a, b| b.date.cmp(&a.date));
        let opening_signed = in_period.iter().fold(closing_signed, |balance, tx| {
            balance - tx.signed_delta_for(name, self.policy).unwrap_or_default()
        });

        // Walk forward from opening. Stable sort keeps same-day input order.
        in_period.sort_by_key(|tx| tx.date);
        let sides: Vec<(Decimal, Decimal)> = in_period
            .iter()
            .map(|tx| tx.sides_for(name, self.policy))
            .collect();
        let running = RunningBalance::accumulate(
            opening_signed,
            sides.iter().map(|(debit, credit)| debit - credit),
        );

        let rows: Vec<StatementRow> = in_period
            .iter()
            .zip(sides.iter().zip(&running))
            .map(|(tx, ((debit, credit), balance))| StatementRow {
                date: tx.date,
                transaction_id: tx.id,
                number: tx.number.clone(),
                voucher_type: tx.voucher_type,
                contra: contra_for(tx, name),
                debit: *debit,
                credit: *credit,
                running_signed: balance.current_balance,
                running: Balance::from_signed(balance.current_balance),
            })
            .collect();

        let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();

        LedgerStatement {
            account: account.name.clone(),
            range,
            opening_signed,
            rows,
            total_debit,
            total_credit,
            closing_signed,
        }
    }
}

/// Counter-party label of `tx` as seen from `account`.
#[must_use]
pub fn contra_for(tx: &Transaction, account: &str) -> Contra {
    let mut others: Vec<&str> = Vec::new();
    for line in tx.ledger_lines() {
        let name = line.account.as_str();
        if name != account && !others.contains(&name) {
            others.push(name);
        }
    }

    match others.as_slice() {
        [] => Contra::None,
        [only] => Contra::Single {
            account: (*only).to_string(),
        },
        [first, rest @ ..] => Contra::Multiple {
            first: (*first).to_string(),
            others: rest.len(),
        },
    }
}
