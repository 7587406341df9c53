//! Reporting periods and financial years.

pub mod period;

pub use period::{DateRange, PeriodError};
