//! Company session facade.
//!
//! One [`CompanySession`] per open company. It owns that company's
//! classifier registry and engine settings and wires the calculators
//! together over a caller-supplied [`Snapshot`]. Sessions never share
//! registry state.

use chrono::NaiveDate;
use khata_shared::types::{Balance, CompanyId};
use khata_shared::{AppConfig, CompanyConfig, EngineConfig};
use tracing::debug;

use crate::classify::{AccountClassifier, NaturalClass};
use crate::fiscal::{DateRange, PeriodError};
use crate::inventory::{InventoryError, StockItem, StockPosition, StockRegister, StockValuationReconciler};
use crate::ledger::{
    Account, BalanceReconstructor, IntegrityReport, PeriodMovement, PeriodMovementCalculator,
    Transaction, TransactionIndex,
};
use crate::reports::{
    GroupAggregator, GroupSummary, LedgerStatement, LedgerStatementBuilder, ProfitAndLoss,
    RatioAnalysis, RatioInputs, ReportError, Scope, TrialBalance,
};

/// Read-only collections for one company, as fetched from storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snapshot<'a> {
    /// Account masters.
    pub accounts: &'a [Account],
    /// Validated transactions.
    pub transactions: &'a [Transaction],
    /// Stock item masters.
    pub items: &'a [StockItem],
}

impl<'a> Snapshot<'a> {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(
        accounts: &'a [Account],
        transactions: &'a [Transaction],
        items: &'a [StockItem],
    ) -> Self {
        Self {
            accounts,
            transactions,
            items,
        }
    }

    /// Looks up an account by name.
    pub fn account(&self, name: &str) -> Result<&'a Account, ReportError> {
        self.accounts
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| ReportError::AccountNotFound(name.to_string()))
    }

    /// Looks up a stock item by name.
    pub fn item(&self, name: &str) -> Result<&'a StockItem, InventoryError> {
        self.items
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| InventoryError::ItemNotFound(name.to_string()))
    }
}

/// Engine entry point for one open company.
#[derive(Debug, Clone)]
pub struct CompanySession {
    id: CompanyId,
    company: CompanyConfig,
    config: EngineConfig,
    classifier: AccountClassifier,
}

impl CompanySession {
    /// Opens a session with a fresh classifier.
    #[must_use]
    pub fn new(company: CompanyConfig, config: EngineConfig) -> Self {
        let id = CompanyId::new();
        debug!(company_id = %id, company = %company.name, "Opening company session");
        Self {
            id,
            company,
            config,
            classifier: AccountClassifier::new(),
        }
    }

    /// Opens a session from loaded application config.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.company.clone(), config.engine.clone())
    }

    /// Session id.
    #[must_use]
    pub const fn id(&self) -> CompanyId {
        self.id
    }

    /// Company settings.
    #[must_use]
    pub const fn company(&self) -> &CompanyConfig {
        &self.company
    }

    /// Engine settings.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The company's classifier.
    #[must_use]
    pub const fn classifier(&self) -> &AccountClassifier {
        &self.classifier
    }

    /// The company's classifier, for registering custom groups.
    pub fn classifier_mut(&mut self) -> &mut AccountClassifier {
        &mut self.classifier
    }

    /// Financial year containing `date`.
    pub fn financial_year(&self, date: NaiveDate) -> Result<DateRange, PeriodError> {
        DateRange::financial_year(date, self.company.financial_year_start_month)
    }

    /// Balance of `account` as of `cutoff`.
    #[must_use]
    pub fn as_of(&self, account: &Account, transactions: &[Transaction], cutoff: NaiveDate) -> Balance {
        let signed = BalanceReconstructor::new(self.config.line_policy).as_of(
            account.current_signed(),
            transactions,
            &account.name,
            cutoff,
        );
        Balance::from_signed(signed)
    }

    /// Movement through `account` over `range`, oriented by its group's class.
    #[must_use]
    pub fn movement(
        &self,
        account: &Account,
        transactions: &[Transaction],
        range: DateRange,
    ) -> PeriodMovement {
        let class = self.classifier.classify(&account.group);
        PeriodMovementCalculator::new(self.config.line_policy).movement(
            transactions,
            &account.name,
            class,
            range,
        )
    }

    /// Group summaries for a scope, optionally restricted to one class.
    #[must_use]
    pub fn summarize(
        &self,
        snapshot: &Snapshot<'_>,
        scope: Scope,
        class: Option<NaturalClass>,
    ) -> Vec<GroupSummary> {
        GroupAggregator::new(self.config.line_policy).summarize(
            &self.classifier,
            snapshot.accounts,
            snapshot.transactions,
            scope,
            class,
        )
    }

    /// Ledger statement of the named account.
    pub fn statement(
        &self,
        snapshot: &Snapshot<'_>,
        account: &str,
        range: DateRange,
    ) -> Result<LedgerStatement, ReportError> {
        let account = snapshot.account(account)?;
        let index = TransactionIndex::build(snapshot.transactions);
        Ok(LedgerStatementBuilder::new(self.config.line_policy).statement(
            account,
            index.for_account(&account.name).iter().copied(),
            range,
        ))
    }

    /// Trial balance as on `date`.
    #[must_use]
    pub fn trial_balance(&self, snapshot: &Snapshot<'_>, date: NaiveDate) -> TrialBalance {
        TrialBalance::as_on(
            &self.classifier,
            snapshot.accounts,
            snapshot.transactions,
            date,
            self.config.line_policy,
        )
    }

    /// Profit and loss over `range`.
    #[must_use]
    pub fn profit_and_loss(&self, snapshot: &Snapshot<'_>, range: DateRange) -> ProfitAndLoss {
        ProfitAndLoss::for_period(
            &self.classifier,
            snapshot.accounts,
            snapshot.transactions,
            snapshot.items,
            range,
            self.config.line_policy,
        )
    }

    /// Ratios for `range`, balance-sheet figures taken as on its end.
    #[must_use]
    pub fn ratios(&self, snapshot: &Snapshot<'_>, range: DateRange) -> RatioAnalysis {
        let pnl = self.profit_and_loss(snapshot, range);
        let balance_sheet = self.summarize(snapshot, Scope::AsOn { date: range.end() }, None);
        RatioAnalysis::compute(
            RatioInputs::collect(&balance_sheet, &pnl),
            self.config.ratio_scale,
        )
    }

    /// Position of the named item as of `cutoff`.
    pub fn stock_position(
        &self,
        snapshot: &Snapshot<'_>,
        item: &str,
        cutoff: NaiveDate,
    ) -> Result<StockPosition, InventoryError> {
        let item = snapshot.item(item)?;
        Ok(StockValuationReconciler::as_of(item, snapshot.transactions, cutoff))
    }

    /// Movement register of the named item over `range`.
    pub fn stock_register(
        &self,
        snapshot: &Snapshot<'_>,
        item: &str,
        range: DateRange,
    ) -> Result<StockRegister, InventoryError> {
        let item = snapshot.item(item)?;
        Ok(StockValuationReconciler::register(item, snapshot.transactions, range))
    }

    /// Integrity findings for the snapshot.
    #[must_use]
    pub fn integrity_report(&self, snapshot: &Snapshot<'_>) -> IntegrityReport {
        IntegrityReport::check(
            snapshot.accounts,
            snapshot.transactions,
            &self.classifier,
            &self.config,
        )
    }
}

impl Default for CompanySession {
    fn default() -> Self {
        Self::new(CompanyConfig::default(), EngineConfig::default())
    }
}
