//! Reporting periods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors building a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Start date falls after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Financial year start month outside 1-12.
    #[error("Invalid financial year start month: {0}")]
    InvalidStartMonth(u32),
}

/// An inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The financial year containing `date`, for a year starting on the
    /// first day of `start_month`.
    pub fn financial_year(date: NaiveDate, start_month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&start_month) {
            return Err(PeriodError::InvalidStartMonth(start_month));
        }

        let start_year = if date.month() >= start_month {
            date.year()
        } else {
            date.year() - 1
        };
        let start = NaiveDate::from_ymd_opt(start_year, start_month, 1)
            .ok_or(PeriodError::InvalidStartMonth(start_month))?;
        let next_start = NaiveDate::from_ymd_opt(start_year + 1, start_month, 1)
            .ok_or(PeriodError::InvalidStartMonth(start_month))?;
        let end = next_start.pred_opt().unwrap_or(next_start);

        Self::new(start, end)
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Day immediately before the range begins, if representable.
    #[must_use]
    pub fn day_before_start(&self) -> Option<NaiveDate> {
        self.start.pred_opt()
    }

    /// Returns true if the given date falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
