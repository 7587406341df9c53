//! Integration tests for the company session facade.
//!
//! Loads a small book from storage-shaped JSON records, validates it at the
//! boundary and runs every report through one session.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use khata_core::classify::NaturalClass;
use khata_core::fiscal::DateRange;
use khata_core::inventory::StockItem;
use khata_core::ledger::{Account, Transaction, TransactionRecord, validate_records};
use khata_core::reports::{Ratio, ReportError, Scope};
use khata_core::{CompanySession, Snapshot};
use khata_shared::types::Balance;
use khata_shared::{AppError, CompanyConfig, EngineConfig, LinePolicy};

const ACCOUNTS: &str = r#"[
    {"name": "Cash", "group": "Cash-in-Hand",
     "opening_balance": {"magnitude": "5000", "direction": "debit"},
     "balance": {"magnitude": "5300", "direction": "debit"}},
    {"name": "Capital", "group": "Capital Account",
     "opening_balance": {"magnitude": "5000", "direction": "credit"},
     "balance": {"magnitude": "5000", "direction": "credit"}},
    {"name": "Sales", "group": "Sales Accounts",
     "balance": {"magnitude": "1200", "direction": "credit"}},
    {"name": "Purchases", "group": "Purchase Accounts",
     "balance": {"magnitude": "800", "direction": "debit"}},
    {"name": "Creditor", "group": "Sundry Creditors",
     "balance": {"magnitude": "200", "direction": "credit"}},
    {"name": "Shop Rent", "group": "Premises", "category": "Overheads",
     "balance": {"magnitude": "300", "direction": "debit"}}
]"#;

const TRANSACTIONS: &str = r#"[
    {"number": "P-1", "date": "2024-04-02", "voucher_type": "purchase", "lines": [
        {"account": "Purchases", "direction": "debit", "amount": "800"},
        {"account": "Cash", "direction": "credit", "amount": "600"},
        {"account": "Creditor", "direction": "credit", "amount": "200"},
        {"item": "Widget", "direction": "debit", "amount": "800", "quantity": "80"}
    ]},
    {"number": "S-1", "date": "2024-04-18", "voucher_type": "sales", "lines": [
        {"account": "Cash", "direction": "debit", "amount": "1200"},
        {"account": "Sales", "direction": "credit", "amount": "1200"},
        {"item": "Widget", "direction": "credit", "amount": "500", "quantity": "50"}
    ]},
    {"number": "PY-1", "date": "2024-05-01", "voucher_type": "payment", "lines": [
        {"account": "Shop Rent", "direction": "debit", "amount": "300"},
        {"account": "Cash", "direction": "credit", "amount": "300"}
    ]},
    {"number": "PY-2", "date": "2024-05-20", "voucher_type": "payment", "lines": [
        {"account": "Cash", "direction": "credit", "amount": "400"},
        {"account": "Cash", "direction": "debit", "amount": "400"}
    ]}
]"#;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn load_book() -> Result<(Vec<Account>, Vec<Transaction>, Vec<StockItem>)> {
    let accounts: Vec<Account> = serde_json::from_str(ACCOUNTS)?;
    let records: Vec<TransactionRecord> = serde_json::from_str(TRANSACTIONS)?;
    let transactions = validate_records(records)?;
    let items = vec![StockItem::new("Widget", "pcs", dec!(30), dec!(300))];
    Ok((accounts, transactions, items))
}

fn open_session() -> Result<CompanySession> {
    let mut session = CompanySession::new(CompanyConfig::default(), EngineConfig::default());
    session
        .classifier_mut()
        .register("Premises", NaturalClass::Expense)?;
    Ok(session)
}

// ============================================================================
// Test: Point-in-time balances and movement
// ============================================================================

#[test]
fn test_as_of_and_movement() -> Result<()> {
    let (accounts, txs, _) = load_book()?;
    let session = open_session()?;
    let cash = &accounts[0];

    assert_eq!(session.as_of(cash, &txs, date(4, 30)), Balance::debit(dec!(5600)));
    assert_eq!(session.as_of(cash, &txs, date(4, 1)), Balance::debit(dec!(5000)));
    assert_eq!(session.as_of(cash, &txs, date(12, 31)), cash.balance);

    let april = DateRange::new(date(4, 1), date(4, 30))?;
    let sales = session.movement(&accounts[2], &txs, april);
    assert_eq!(sales.oriented(), dec!(1200));
    Ok(())
}

// ============================================================================
// Test: Group summaries and trial balance
// ============================================================================

#[test]
fn test_summaries_and_trial_balance() -> Result<()> {
    let (accounts, txs, items) = load_book()?;
    let session = open_session()?;
    let snapshot = Snapshot::new(&accounts, &txs, &items);

    let expenses = session.summarize(&snapshot, Scope::Current, Some(NaturalClass::Expense));
    let premises = expenses
        .iter()
        .find(|g| g.group == "Premises")
        .expect("registered group is summarized");
    assert_eq!(premises.total, dec!(300));

    let april_end = session.trial_balance(&snapshot, date(4, 30));
    assert!(april_end.is_balanced);
    assert_eq!(april_end.total_debit, dec!(6400));
    assert!(
        april_end
            .rows
            .iter()
            .any(|r| r.account == "Shop Rent" && r.debit.is_zero())
    );

    let latest = session.trial_balance(&snapshot, date(12, 31));
    assert!(latest.is_balanced);
    assert!(latest.class_totals.is_balanced());
    Ok(())
}

// ============================================================================
// Test: Ledger statement
// ============================================================================

#[test]
fn test_statement() -> Result<()> {
    let (accounts, txs, items) = load_book()?;
    let session = open_session()?;
    let snapshot = Snapshot::new(&accounts, &txs, &items);
    let range = DateRange::new(date(4, 1), date(5, 31))?;

    let statement = session.statement(&snapshot, "Cash", range)?;
    assert_eq!(statement.opening(), Balance::debit(dec!(5000)));
    assert_eq!(statement.closing(), Balance::debit(dec!(5300)));
    assert_eq!(statement.rows.len(), 4);
    assert_eq!(statement.rows[0].contra.to_string(), "Purchases (+1 more)");
    assert_eq!(statement.rows[3].contra.to_string(), "");
    assert_eq!(
        statement.total_debit - statement.total_credit,
        statement.closing_signed - statement.opening_signed
    );

    let missing = session.statement(&snapshot, "Nobody", range);
    assert_eq!(missing, Err(ReportError::AccountNotFound("Nobody".to_string())));
    let app: AppError = missing.unwrap_err().into();
    assert_eq!(app.error_code(), "NOT_FOUND");
    Ok(())
}

// ============================================================================
// Test: Profit and loss, ratios and stock
// ============================================================================

#[test]
fn test_profit_loss_ratios_and_stock() -> Result<()> {
    let (accounts, txs, items) = load_book()?;
    let session = open_session()?;
    let snapshot = Snapshot::new(&accounts, &txs, &items);
    let year = session.financial_year(date(5, 15))?;
    assert_eq!(year.start(), date(4, 1));

    let pnl = session.profit_and_loss(&snapshot, year);
    assert_eq!(pnl.closing_stock, dec!(300));
    assert_eq!(pnl.gross_profit, dec!(700));
    assert_eq!(pnl.net_profit, dec!(400));

    let ratios = session.ratios(&snapshot, year);
    // Current assets: cash 5300 + item stock 300. Current liabilities: creditor 200.
    assert_eq!(ratios.current_ratio.to_string(), "28.00");
    assert_eq!(ratios.quick_ratio.to_string(), "26.50");
    assert_eq!(ratios.debt_equity, Ratio::Value(dec!(0)));
    assert_eq!(ratios.gross_margin.to_string(), "58.33");

    let position = session.stock_position(&snapshot, "Widget", date(4, 10))?;
    assert_eq!(position.quantity, dec!(80));

    let register = session.stock_register(&snapshot, "Widget", year)?;
    assert_eq!(register.rows.len(), 2);
    assert_eq!(register.closing.value, dec!(300));

    assert!(session.stock_position(&snapshot, "Gizmo", date(4, 10)).is_err());
    Ok(())
}

// ============================================================================
// Test: Integrity report
// ============================================================================

#[test]
fn test_integrity_report() -> Result<()> {
    let (mut accounts, txs, items) = load_book()?;
    let session = open_session()?;

    let report = session.integrity_report(&Snapshot::new(&accounts, &txs, &items));
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.repeated_accounts.len(), 1);
    assert_eq!(report.repeated_accounts[0].number, "PY-2");

    accounts[0].balance = Balance::debit(dec!(5350));
    let report = session.integrity_report(&Snapshot::new(&accounts, &txs, &items));
    assert!(!report.is_clean());
    assert_eq!(report.mismatches[0].difference, dec!(50));
    Ok(())
}

// ============================================================================
// Test: Sessions do not share classifier state
// ============================================================================

#[test]
fn test_sessions_are_isolated() -> Result<()> {
    let first = open_session()?;
    let second = CompanySession::default();

    assert_eq!(first.classifier().classify("Premises"), NaturalClass::Expense);
    assert_eq!(second.classifier().classify("Premises"), NaturalClass::Liability);
    assert_ne!(first.id(), second.id());
    Ok(())
}

#[test]
fn test_first_match_policy_from_config() -> Result<()> {
    let (accounts, txs, _) = load_book()?;
    let session = CompanySession::new(
        CompanyConfig::default(),
        EngineConfig {
            line_policy: LinePolicy::FirstMatch,
            ..EngineConfig::default()
        },
    );

    // PY-2 credits then debits Cash; only the credit counts under first-match.
    let before = session.as_of(&accounts[0], &txs, date(5, 19));
    assert_eq!(before.signed() - accounts[0].current_signed(), dec!(400));
    assert_eq!(session.config().line_policy, LinePolicy::FirstMatch);
    assert_eq!(session.as_of(&accounts[0], &txs, date(12, 31)), accounts[0].balance);
    Ok(())
}
