//! Integrity validation of live balances against a full replay.
//!
//! Historical balances are derived by reversing the live balance, so an
//! out-of-band edit to that balance corrupts every reconstruction. The
//! checks here recompute `opening + Σ deltas` and compare it with the live
//! figure, and collect other data-integrity findings in the snapshot.

use std::collections::HashSet;

use khata_shared::types::TransactionId;
use khata_shared::{EngineConfig, LinePolicy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::balance::BalanceReconstructor;
use super::index::TransactionIndex;
use super::types::{Account, Transaction};
use crate::classify::AccountClassifier;

/// Outcome of replaying one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Account name.
    pub account: String,
    /// Opening balance plus every delta (signed).
    pub expected: Decimal,
    /// Live balance (signed).
    pub actual: Decimal,
    /// `actual - expected`.
    pub difference: Decimal,
    /// True when `|difference|` is within tolerance.
    pub is_consistent: bool,
}

/// Replays accounts from their opening balances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciler {
    policy: LinePolicy,
    tolerance: Decimal,
}

impl Reconciler {
    /// Creates a reconciler.
    #[must_use]
    pub fn new(policy: LinePolicy, tolerance: Decimal) -> Self {
        Self {
            policy,
            tolerance: tolerance.abs(),
        }
    }

    /// Creates a reconciler from engine settings.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.line_policy, config.reconciliation_tolerance)
    }

    /// Compares the live balance of `account` with a full replay.
    #[must_use]
    pub fn reconcile_account<'a>(
        &self,
        account: &Account,
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Reconciliation {
        let expected = BalanceReconstructor::new(self.policy).replay(
            account.opening_signed(),
            transactions,
            &account.name,
        );
        let actual = account.current_signed();
        let difference = actual - expected;

        Reconciliation {
            account: account.name.clone(),
            expected,
            actual,
            difference,
            is_consistent: difference.abs() <= self.tolerance,
        }
    }
}

/// A line pointing at an account that is not in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanLine {
    /// Transaction id.
    pub transaction_id: TransactionId,
    /// Voucher number.
    pub number: String,
    /// Account name that did not resolve.
    pub account: String,
}

/// A transaction whose ledger debits differ from its credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbalancedTransaction {
    /// Transaction id.
    pub transaction_id: TransactionId,
    /// Voucher number.
    pub number: String,
    /// Total debit.
    pub debit: Decimal,
    /// Total credit.
    pub credit: Decimal,
}

/// A transaction posting several lines to the same account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedAccount {
    /// Transaction id.
    pub transaction_id: TransactionId,
    /// Voucher number.
    pub number: String,
    /// Account appearing on more than one line.
    pub account: String,
}

/// An account whose group is neither built in nor registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownGroup {
    /// Account name.
    pub account: String,
    /// Group name that fell back to the default class.
    pub group: String,
}

/// Integrity findings for one snapshot.
///
/// Error-level findings: reconciliation mismatches, orphan lines, unbalanced
/// transactions, and unknown groups when `strict_groups` is on.
/// Warning-level findings: repeated accounts within one transaction, and
/// unknown groups otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Accounts whose live balance disagrees with the replay.
    pub mismatches: Vec<Reconciliation>,
    /// Lines referencing missing accounts.
    pub orphan_lines: Vec<OrphanLine>,
    /// Transactions with debits != credits.
    pub unbalanced: Vec<UnbalancedTransaction>,
    /// Transactions posting one account on several lines.
    pub repeated_accounts: Vec<RepeatedAccount>,
    /// Accounts in unknown groups.
    pub unknown_groups: Vec<UnknownGroup>,
    /// Whether unknown groups count as errors.
    pub strict_groups: bool,
}

impl IntegrityReport {
    /// Runs every check over a snapshot.
    #[must_use]
    pub fn check(
        accounts: &[Account],
        transactions: &[Transaction],
        classifier: &AccountClassifier,
        config: &EngineConfig,
    ) -> Self {
        debug!(
            accounts = accounts.len(),
            transactions = transactions.len(),
            "Running integrity check"
        );

        let index = TransactionIndex::build(transactions);
        let reconciler = Reconciler::from_config(config);
        let mut report = Self {
            strict_groups: config.strict_groups,
            ..Self::default()
        };

        for account in accounts {
            let reconciliation =
                reconciler.reconcile_account(account, index.for_account(&account.name).iter().copied());
            if !reconciliation.is_consistent {
                warn!(
                    account = %account.name,
                    expected = %reconciliation.expected,
                    actual = %reconciliation.actual,
                    "Live balance does not match replay"
                );
                report.mismatches.push(reconciliation);
            }

            if !classifier.is_known(&account.group) {
                report.unknown_groups.push(UnknownGroup {
                    account: account.name.clone(),
                    group: account.group.clone(),
                });
            }
        }

        let known: HashSet<&str> = accounts.iter().map(|a| a.name.as_str()).collect();
        for tx in transactions {
            for line in tx.ledger_lines() {
                if !known.contains(line.account.as_str()) {
                    warn!(number = %tx.number, account = %line.account, "Line references unknown account");
                    report.orphan_lines.push(OrphanLine {
                        transaction_id: tx.id,
                        number: tx.number.clone(),
                        account: line.account.clone(),
                    });
                }
            }

            let (debit, credit) = tx.ledger_totals();
            if debit != credit {
                report.unbalanced.push(UnbalancedTransaction {
                    transaction_id: tx.id,
                    number: tx.number.clone(),
                    debit,
                    credit,
                });
            }

            for account in tx.repeated_accounts() {
                report.repeated_accounts.push(RepeatedAccount {
                    transaction_id: tx.id,
                    number: tx.number.clone(),
                    account: account.to_string(),
                });
            }
        }

        report
    }

    /// Number of error-level findings.
    #[must_use]
    pub fn error_count(&self) -> usize {
        let unknown = if self.strict_groups {
            self.unknown_groups.len()
        } else {
            0
        };
        self.mismatches.len() + self.orphan_lines.len() + self.unbalanced.len() + unknown
    }

    /// Number of warning-level findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        let unknown = if self.strict_groups {
            0
        } else {
            self.unknown_groups.len()
        };
        self.repeated_accounts.len() + unknown
    }

    /// True when there are no error-level findings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }
}
