//! Ratio analysis.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::aggregate::total_of;
use super::profit_loss::ProfitAndLoss;
use super::types::GroupSummary;
use crate::classify::names;

/// Groups counted as current assets.
pub const CURRENT_ASSET_GROUPS: [&str; 7] = [
    names::BANK_ACCOUNTS,
    names::CASH_IN_HAND,
    names::CURRENT_ASSETS,
    names::DEPOSITS_ASSET,
    names::LOANS_AND_ADVANCES_ASSET,
    names::STOCK_IN_HAND,
    names::SUNDRY_DEBTORS,
];

/// Groups counted as current liabilities.
pub const CURRENT_LIABILITY_GROUPS: [&str; 5] = [
    names::BANK_OD,
    names::CURRENT_LIABILITIES,
    names::DUTIES_AND_TAXES,
    names::PROVISIONS,
    names::SUNDRY_CREDITORS,
];

/// Groups counted as borrowed funds.
pub const LOAN_GROUPS: [&str; 3] = [
    names::LOANS_LIABILITY,
    names::SECURED_LOANS,
    names::UNSECURED_LOANS,
];

/// Groups counted as owners' funds.
pub const CAPITAL_GROUPS: [&str; 2] = [names::CAPITAL_ACCOUNT, names::RESERVES_AND_SURPLUS];

/// A ratio, or "not applicable" when its denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Ratio {
    /// Computed value, rounded to the configured scale.
    Value(Decimal),
    /// Denominator was zero.
    NotApplicable,
}

impl Ratio {
    /// `numerator / denominator` rounded to `scale` places.
    #[must_use]
    pub fn divide(numerator: Decimal, denominator: Decimal, scale: u32) -> Self {
        if denominator.is_zero() {
            return Self::NotApplicable;
        }
        numerator
            .checked_div(denominator)
            .map_or(Self::NotApplicable, |value| Self::Value(fixed_scale(value, scale)))
    }

    /// `numerator / denominator * 100` rounded to `scale` places.
    #[must_use]
    pub fn percent(numerator: Decimal, denominator: Decimal, scale: u32) -> Self {
        if denominator.is_zero() {
            return Self::NotApplicable;
        }
        numerator
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|n| n.checked_div(denominator))
            .map_or(Self::NotApplicable, |value| Self::Value(fixed_scale(value, scale)))
    }

    /// The value, if applicable.
    #[must_use]
    pub const fn value(&self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NotApplicable => None,
        }
    }
}

fn fixed_scale(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

impl std::fmt::Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Figures ratios are computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioInputs {
    /// Current assets, item stock included.
    pub current_assets: Decimal,
    /// Current liabilities.
    pub current_liabilities: Decimal,
    /// Stock on hand (Stock-in-Hand group plus item stock).
    pub stock: Decimal,
    /// Borrowed funds.
    pub loans: Decimal,
    /// Owners' funds.
    pub capital: Decimal,
    /// Sales for the period.
    pub sales: Decimal,
    /// Gross profit for the period.
    pub gross_profit: Decimal,
    /// Net profit for the period.
    pub net_profit: Decimal,
}

impl RatioInputs {
    /// Collects inputs from balance-sheet group summaries (as on the period
    /// end) and the period's profit and loss.
    ///
    /// Item stock valued by the inventory side is added to both current
    /// assets and stock.
    #[must_use]
    pub fn collect(balance_sheet: &[GroupSummary], pnl: &ProfitAndLoss) -> Self {
        let stock = total_of(balance_sheet, &[names::STOCK_IN_HAND]) + pnl.closing_stock;
        Self {
            current_assets: total_of(balance_sheet, &CURRENT_ASSET_GROUPS) + pnl.closing_stock,
            current_liabilities: total_of(balance_sheet, &CURRENT_LIABILITY_GROUPS),
            stock,
            loans: total_of(balance_sheet, &LOAN_GROUPS),
            capital: total_of(balance_sheet, &CAPITAL_GROUPS),
            sales: pnl.sales,
            gross_profit: pnl.gross_profit,
            net_profit: pnl.net_profit,
        }
    }
}

/// Standard ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioAnalysis {
    /// Inputs used.
    pub inputs: RatioInputs,
    /// Current assets minus current liabilities.
    pub working_capital: Decimal,
    /// Current assets / current liabilities.
    pub current_ratio: Ratio,
    /// (Current assets - stock) / current liabilities.
    pub quick_ratio: Ratio,
    /// Loans / capital.
    pub debt_equity: Ratio,
    /// Gross profit as a percent of sales.
    pub gross_margin: Ratio,
    /// Net profit as a percent of sales.
    pub net_margin: Ratio,
}

impl RatioAnalysis {
    /// Computes ratios, rounding each to `scale` places.
    #[must_use]
    pub fn compute(inputs: RatioInputs, scale: u32) -> Self {
        Self {
            inputs,
            working_capital: inputs.current_assets - inputs.current_liabilities,
            current_ratio: Ratio::divide(inputs.current_assets, inputs.current_liabilities, scale),
            quick_ratio: Ratio::divide(
                inputs.current_assets - inputs.stock,
                inputs.current_liabilities,
                scale,
            ),
            debt_equity: Ratio::divide(inputs.loans, inputs.capital, scale),
            gross_margin: Ratio::percent(inputs.gross_profit, inputs.sales, scale),
            net_margin: Ratio::percent(inputs.net_profit, inputs.sales, scale),
        }
    }
}
