//! Group aggregation.
//!
//! Sums account-level figures into named groups for one of three scopes:
//! live balances, balances as on a date, or movement within a period.
//! Per-account work fans out with rayon over the immutable snapshot; the
//! output is sorted so it never depends on scheduling.

use std::collections::{BTreeMap, BTreeSet};

use khata_shared::LinePolicy;
use khata_shared::types::Balance;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{GroupSummary, MemberBalance, Scope};
use crate::classify::{AccountClassifier, NaturalClass};
use crate::ledger::{
    Account, BalanceReconstructor, PeriodMovementCalculator, Transaction, TransactionIndex,
};

/// Aggregates accounts into group summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupAggregator {
    policy: LinePolicy,
}

impl GroupAggregator {
    /// Creates an aggregator with the given line policy.
    #[must_use]
    pub const fn new(policy: LinePolicy) -> Self {
        Self { policy }
    }

    /// Signed figure (positive = Debit) of one account for a scope.
    #[must_use]
    pub fn account_figure(
        &self,
        account: &Account,
        transactions: &[&Transaction],
        class: NaturalClass,
        scope: Scope,
    ) -> Decimal {
        match scope {
            Scope::Current => account.current_signed(),
            Scope::AsOn { date } => BalanceReconstructor::new(self.policy).as_of(
                account.current_signed(),
                transactions.iter().copied(),
                &account.name,
                date,
            ),
            Scope::Period { range } => PeriodMovementCalculator::new(self.policy)
                .movement(transactions.iter().copied(), &account.name, class, range)
                .signed(),
        }
    }

    /// Summarizes accounts into groups.
    ///
    /// Every group of the requested class appears, including empty built-in
    /// and registered groups, with a zero total. `None` summarizes all four
    /// classes. Groups are ordered by class then name.
    #[must_use]
    pub fn summarize(
        &self,
        classifier: &AccountClassifier,
        accounts: &[Account],
        transactions: &[Transaction],
        scope: Scope,
        class_filter: Option<NaturalClass>,
    ) -> Vec<GroupSummary> {
        let index = TransactionIndex::build(transactions);
        self.summarize_indexed(classifier, accounts, &index, scope, class_filter)
    }

    /// Same as [`Self::summarize`] over a prebuilt index.
    #[must_use]
    pub fn summarize_indexed(
        &self,
        classifier: &AccountClassifier,
        accounts: &[Account],
        index: &TransactionIndex<'_>,
        scope: Scope,
        class_filter: Option<NaturalClass>,
    ) -> Vec<GroupSummary> {
        debug!(
            accounts = accounts.len(),
            transactions = index.len(),
            ?scope,
            ?class_filter,
            "Summarizing groups"
        );

        let wanted = |class: NaturalClass| class_filter.is_none_or(|c| c == class);

        let members: Vec<(String, NaturalClass, MemberBalance)> = accounts
            .par_iter()
            .filter_map(|account| {
                let group = account.group.trim();
                let class = classifier.classify(group);
                if !wanted(class) {
                    return None;
                }
                let signed =
                    self.account_figure(account, index.for_account(&account.name), class, scope);
                Some((
                    group.to_string(),
                    class,
                    MemberBalance {
                        account: account.name.clone(),
                        signed,
                        balance: Balance::from_signed(signed),
                    },
                ))
            })
            .collect();

        let mut groups: BTreeMap<(NaturalClass, String), Vec<MemberBalance>> = NaturalClass::ALL
            .into_iter()
            .filter(|class| wanted(*class))
            .flat_map(|class| {
                classifier
                    .list_groups(class)
                    .into_iter()
                    .map(move |group| ((class, group), Vec::new()))
            })
            .collect();

        for (group, class, member) in members {
            groups.entry((class, group)).or_default().push(member);
        }

        groups
            .into_iter()
            .map(|((class, group), mut members)| {
                members.sort_by(|a, b| a.account.cmp(&b.account));
                let total = members.iter().map(|m| class.orient(m.signed)).sum();
                GroupSummary {
                    group,
                    class,
                    total,
                    members,
                }
            })
            .collect()
    }

    /// Names of groups that have at least one member in `summaries`.
    #[must_use]
    pub fn populated_groups(summaries: &[GroupSummary]) -> BTreeSet<&str> {
        summaries
            .iter()
            .filter(|s| !s.members.is_empty())
            .map(|s| s.group.as_str())
            .collect()
    }
}

/// Sum of totals for the named groups.
#[must_use]
pub fn total_of(summaries: &[GroupSummary], groups: &[&str]) -> Decimal {
    summaries
        .iter()
        .filter(|s| groups.contains(&s.group.as_str()))
        .map(|s| s.total)
        .sum()
}
