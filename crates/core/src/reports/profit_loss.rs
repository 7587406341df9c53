//! Profit and loss with stock adjustment.

use khata_shared::LinePolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::{GroupAggregator, total_of};
use super::types::{GroupSummary, Scope};
use crate::classify::{AccountClassifier, NaturalClass, names};
use crate::fiscal::DateRange;
use crate::inventory::{StockItem, StockValuationReconciler};
use crate::ledger::{Account, Transaction};

/// Profit and loss for a period.
///
/// Trading section:
/// `gross_profit = sales + direct_incomes + closing_stock - opening_stock - purchases - direct_expenses`
///
/// Then `net_profit = gross_profit + indirect_incomes - indirect_expenses`,
/// where "indirect" covers every income or expense group outside the
/// trading section, registered groups included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    /// Reporting period.
    pub range: DateRange,
    /// Sales Accounts movement.
    pub sales: Decimal,
    /// Direct Incomes movement.
    pub direct_incomes: Decimal,
    /// Purchase Accounts movement.
    pub purchases: Decimal,
    /// Direct Expenses movement.
    pub direct_expenses: Decimal,
    /// Stock value at the start of the period.
    pub opening_stock: Decimal,
    /// Stock value at the end of the period.
    pub closing_stock: Decimal,
    /// Trading result.
    pub gross_profit: Decimal,
    /// Income outside the trading section.
    pub indirect_incomes: Decimal,
    /// Expense outside the trading section.
    pub indirect_expenses: Decimal,
    /// Final result; negative is a loss.
    pub net_profit: Decimal,
    /// Income groups with their movements.
    pub income_groups: Vec<GroupSummary>,
    /// Expense groups with their movements.
    pub expense_groups: Vec<GroupSummary>,
}

const TRADING_INCOME: [&str; 2] = [names::SALES_ACCOUNTS, names::DIRECT_INCOMES];
const TRADING_EXPENSE: [&str; 2] = [names::PURCHASE_ACCOUNTS, names::DIRECT_EXPENSES];

impl ProfitAndLoss {
    /// Computes profit and loss over `range`.
    #[must_use]
    pub fn for_period(
        classifier: &AccountClassifier,
        accounts: &[Account],
        transactions: &[Transaction],
        items: &[StockItem],
        range: DateRange,
        policy: LinePolicy,
    ) -> Self {
        debug!(%range, "Generating profit and loss");

        let aggregator = GroupAggregator::new(policy);
        let scope = Scope::Period { range };
        let income_groups = aggregator.summarize(
            classifier,
            accounts,
            transactions,
            scope,
            Some(NaturalClass::Income),
        );
        let expense_groups = aggregator.summarize(
            classifier,
            accounts,
            transactions,
            scope,
            Some(NaturalClass::Expense),
        );

        let sales = total_of(&income_groups, &[names::SALES_ACCOUNTS]);
        let direct_incomes = total_of(&income_groups, &[names::DIRECT_INCOMES]);
        let purchases = total_of(&expense_groups, &[names::PURCHASE_ACCOUNTS]);
        let direct_expenses = total_of(&expense_groups, &[names::DIRECT_EXPENSES]);

        let indirect_incomes: Decimal = income_groups
            .iter()
            .filter(|g| !TRADING_INCOME.contains(&g.group.as_str()))
            .map(|g| g.total)
            .sum();
        let indirect_expenses: Decimal = expense_groups
            .iter()
            .filter(|g| !TRADING_EXPENSE.contains(&g.group.as_str()))
            .map(|g| g.total)
            .sum();

        let opening_stock =
            StockValuationReconciler::opening_stock_value(items, transactions, range.start());
        let closing_stock =
            StockValuationReconciler::closing_stock_value(items, transactions, range.end());

        let gross_profit =
            sales + direct_incomes + closing_stock - opening_stock - purchases - direct_expenses;
        let net_profit = gross_profit + indirect_incomes - indirect_expenses;

        Self {
            range,
            sales,
            direct_incomes,
            purchases,
            direct_expenses,
            opening_stock,
            closing_stock,
            gross_profit,
            indirect_incomes,
            indirect_expenses,
            net_profit,
            income_groups,
            expense_groups,
        }
    }

    /// Returns true when the period closed at a loss.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.net_profit < Decimal::ZERO
    }
}
