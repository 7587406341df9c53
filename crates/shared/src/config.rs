//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Company (books) configuration.
    #[serde(default)]
    pub company: CompanyConfig,
    /// Engine behaviour switches.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Company configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    /// Display name of the open company.
    #[serde(default = "default_company_name")]
    pub name: String,
    /// Month (1-12) the financial year starts in.
    #[serde(default = "default_year_start_month")]
    pub financial_year_start_month: u32,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            financial_year_start_month: default_year_start_month(),
        }
    }
}

fn default_company_name() -> String {
    "Default Company".to_string()
}

fn default_year_start_month() -> u32 {
    4 // April
}

/// How a transaction with several lines against the same account is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinePolicy {
    /// Every matching line contributes its delta.
    #[default]
    SumAll,
    /// Only the first matching line counts (legacy behaviour).
    FirstMatch,
}

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Policy for several lines against one account in one transaction.
    #[serde(default)]
    pub line_policy: LinePolicy,
    /// Report unknown group names as errors instead of warnings.
    #[serde(default)]
    pub strict_groups: bool,
    /// Absolute difference tolerated when reconciling live balances.
    #[serde(default)]
    pub reconciliation_tolerance: Decimal,
    /// Decimal places ratios are rounded to.
    #[serde(default = "default_ratio_scale")]
    pub ratio_scale: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            line_policy: LinePolicy::default(),
            strict_groups: false,
            reconciliation_tolerance: Decimal::ZERO,
            ratio_scale: default_ratio_scale(),
        }
    }
}

fn default_ratio_scale() -> u32 {
    2
}

impl AppConfig {
    /// Loads configuration from `.env`, config files and environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `KHATA__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KHATA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
