//! Trial balance as on a date.

use chrono::NaiveDate;
use khata_shared::LinePolicy;
use rust_decimal::Decimal;
use tracing::debug;

use super::aggregate::GroupAggregator;
use super::types::{ClassTotals, Scope, TrialBalance, TrialBalanceRow};
use crate::classify::AccountClassifier;
use crate::ledger::{Account, Transaction};

impl TrialBalance {
    /// Lists every account with its balance as on `date`.
    ///
    /// Rows come from the same group summaries that produce the class
    /// totals, so the two always agree.
    #[must_use]
    pub fn as_on(
        classifier: &AccountClassifier,
        accounts: &[Account],
        transactions: &[Transaction],
        date: NaiveDate,
        policy: LinePolicy,
    ) -> Self {
        debug!(%date, accounts = accounts.len(), "Generating trial balance");

        let summaries = GroupAggregator::new(policy).summarize(
            classifier,
            accounts,
            transactions,
            Scope::AsOn { date },
            None,
        );

        let rows: Vec<TrialBalanceRow> = summaries
            .iter()
            .flat_map(|summary| {
                summary.members.iter().map(|member| {
                    let (debit, credit) = if member.signed >= Decimal::ZERO {
                        (member.signed, Decimal::ZERO)
                    } else {
                        (Decimal::ZERO, -member.signed)
                    };
                    TrialBalanceRow {
                        account: member.account.clone(),
                        group: summary.group.clone(),
                        class: summary.class,
                        debit,
                        credit,
                    }
                })
            })
            .collect();

        let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();

        Self {
            as_on: date,
            rows,
            total_debit,
            total_credit,
            class_totals: ClassTotals::from_summaries(&summaries),
            is_balanced: total_debit == total_credit,
        }
    }
}
