//! Natural classes and the built-in group table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use khata_shared::types::Direction;

use names::*;

/// Natural class of a group.
///
/// - Asset/Expense: debit-normal, a positive signed value is a normal balance
/// - Liability/Income: credit-normal, a negative signed value is a normal balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NaturalClass {
    /// Asset-like (cash, bank, debtors, stock).
    Asset,
    /// Liability-like (capital, loans, creditors, duties).
    Liability,
    /// Income-like (sales, other income).
    Income,
    /// Expense-like (purchases, overheads).
    Expense,
}

impl NaturalClass {
    /// All four classes in report order.
    pub const ALL: [Self; 4] = [Self::Asset, Self::Liability, Self::Income, Self::Expense];

    /// Side on which increases are recorded.
    #[must_use]
    pub const fn normal_direction(self) -> Direction {
        match self {
            Self::Asset | Self::Expense => Direction::Debit,
            Self::Liability | Self::Income => Direction::Credit,
        }
    }

    /// Returns true for Asset and Expense.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self.normal_direction(), Direction::Debit)
    }

    /// Orients a signed value (positive = Debit) so that positive means
    /// "normal for this class".
    #[must_use]
    pub fn orient(self, signed: Decimal) -> Decimal {
        if self.is_debit_normal() { signed } else { -signed }
    }

    /// Returns true for classes that appear on the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability)
    }
}

impl std::fmt::Display for NaturalClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for NaturalClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" | "assets" => Ok(Self::Asset),
            "liability" | "liabilities" => Ok(Self::Liability),
            "income" | "incomes" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            _ => Err(format!("Unknown natural class: {s}")),
        }
    }
}

/// Class assigned to group names nobody registered.
///
/// Unknown groups are read as credit-like (neither asset nor expense).
/// The fallback is logged and surfaced by the integrity report.
pub const FALLBACK_CLASS: NaturalClass = NaturalClass::Liability;

/// Built-in group names referenced by reports.
#[allow(missing_docs)]
pub mod names {
    pub const BANK_ACCOUNTS: &str = "Bank Accounts";
    pub const BANK_OD: &str = "Bank OD A/c";
    pub const CAPITAL_ACCOUNT: &str = "Capital Account";
    pub const CASH_IN_HAND: &str = "Cash-in-Hand";
    pub const CURRENT_ASSETS: &str = "Current Assets";
    pub const CURRENT_LIABILITIES: &str = "Current Liabilities";
    pub const DEPOSITS_ASSET: &str = "Deposits (Asset)";
    pub const DIRECT_EXPENSES: &str = "Direct Expenses";
    pub const DIRECT_INCOMES: &str = "Direct Incomes";
    pub const DUTIES_AND_TAXES: &str = "Duties & Taxes";
    pub const FIXED_ASSETS: &str = "Fixed Assets";
    pub const INDIRECT_EXPENSES: &str = "Indirect Expenses";
    pub const INDIRECT_INCOMES: &str = "Indirect Incomes";
    pub const INVESTMENTS: &str = "Investments";
    pub const LOANS_AND_ADVANCES_ASSET: &str = "Loans & Advances (Asset)";
    pub const LOANS_LIABILITY: &str = "Loans (Liability)";
    pub const MISC_EXPENSES_ASSET: &str = "Misc. Expenses (ASSET)";
    pub const PROVISIONS: &str = "Provisions";
    pub const PURCHASE_ACCOUNTS: &str = "Purchase Accounts";
    pub const RESERVES_AND_SURPLUS: &str = "Reserves & Surplus";
    pub const SALES_ACCOUNTS: &str = "Sales Accounts";
    pub const SECURED_LOANS: &str = "Secured Loans";
    pub const STOCK_IN_HAND: &str = "Stock-in-Hand";
    pub const SUNDRY_CREDITORS: &str = "Sundry Creditors";
    pub const SUNDRY_DEBTORS: &str = "Sundry Debtors";
    pub const SUSPENSE: &str = "Suspense A/c";
    pub const UNSECURED_LOANS: &str = "Unsecured Loans";
}

/// Built-in groups every company starts with.
pub const BUILT_IN_GROUPS: &[(&str, NaturalClass)] = &[
    (BANK_ACCOUNTS, NaturalClass::Asset),
    (CASH_IN_HAND, NaturalClass::Asset),
    (CURRENT_ASSETS, NaturalClass::Asset),
    (DEPOSITS_ASSET, NaturalClass::Asset),
    (FIXED_ASSETS, NaturalClass::Asset),
    (INVESTMENTS, NaturalClass::Asset),
    (LOANS_AND_ADVANCES_ASSET, NaturalClass::Asset),
    (MISC_EXPENSES_ASSET, NaturalClass::Asset),
    (STOCK_IN_HAND, NaturalClass::Asset),
    (SUNDRY_DEBTORS, NaturalClass::Asset),
    (BANK_OD, NaturalClass::Liability),
    (CAPITAL_ACCOUNT, NaturalClass::Liability),
    (CURRENT_LIABILITIES, NaturalClass::Liability),
    (DUTIES_AND_TAXES, NaturalClass::Liability),
    (LOANS_LIABILITY, NaturalClass::Liability),
    (PROVISIONS, NaturalClass::Liability),
    (RESERVES_AND_SURPLUS, NaturalClass::Liability),
    (SECURED_LOANS, NaturalClass::Liability),
    (SUNDRY_CREDITORS, NaturalClass::Liability),
    (SUSPENSE, NaturalClass::Liability),
    (UNSECURED_LOANS, NaturalClass::Liability),
    (DIRECT_INCOMES, NaturalClass::Income),
    (INDIRECT_INCOMES, NaturalClass::Income),
    (SALES_ACCOUNTS, NaturalClass::Income),
    (DIRECT_EXPENSES, NaturalClass::Expense),
    (INDIRECT_EXPENSES, NaturalClass::Expense),
    (PURCHASE_ACCOUNTS, NaturalClass::Expense),
];

/// Looks up a built-in group.
#[must_use]
pub fn built_in_class(group: &str) -> Option<NaturalClass> {
    BUILT_IN_GROUPS
        .iter()
        .find(|(name, _)| *name == group)
        .map(|(_, class)| *class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    #[test]
    fn test_normal_direction() {
        assert_eq!(NaturalClass::Asset.normal_direction(), Direction::Debit);
        assert_eq!(NaturalClass::Expense.normal_direction(), Direction::Debit);
        assert_eq!(NaturalClass::Liability.normal_direction(), Direction::Credit);
        assert_eq!(NaturalClass::Income.normal_direction(), Direction::Credit);
    }

    #[test]
    fn test_orient() {
        assert_eq!(NaturalClass::Asset.orient(dec!(100)), dec!(100));
        assert_eq!(NaturalClass::Income.orient(dec!(-500)), dec!(500));
        assert_eq!(NaturalClass::Income.orient(dec!(100)), dec!(-100));
    }

    #[test]
    fn test_built_in_names_unique() {
        let names: HashSet<&str> = BUILT_IN_GROUPS.iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), BUILT_IN_GROUPS.len());
    }

    #[test]
    fn test_fallback_is_credit_like() {
        assert!(!FALLBACK_CLASS.is_debit_normal());
    }

    #[test]
    fn test_class_from_str() {
        assert_eq!("Assets".parse::<NaturalClass>().unwrap(), NaturalClass::Asset);
        assert_eq!("expense".parse::<NaturalClass>().unwrap(), NaturalClass::Expense);
        assert!("equity".parse::<NaturalClass>().is_err());
    }
}
