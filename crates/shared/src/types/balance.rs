//! Signed balances and their (magnitude, direction) boundary form.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Inside the engine every balance is one signed `Decimal` where positive
//! means Debit and negative means Credit. `Balance` is the pair shown to
//! users and stored on account masters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a stored balance breaks the non-negative magnitude rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// Magnitude is negative.
    #[error("Balance magnitude cannot be negative: {0}")]
    NegativeMagnitude(Decimal),
}

/// Side of a ledger line or balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Debit side (positive when signed).
    #[default]
    Debit,
    /// Credit side (negative when signed).
    Credit,
}

impl Direction {
    /// Applies this direction's sign to a non-negative magnitude.
    #[must_use]
    pub fn sign(self, magnitude: Decimal) -> Decimal {
        match self {
            Self::Debit => magnitude,
            Self::Credit => -magnitude,
        }
    }

    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }

    /// Short label used on statements ("Dr" / "Cr").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debit => "Dr",
            Self::Credit => "Cr",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "Debit"),
            Self::Credit => write!(f, "Credit"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "dr" => Ok(Self::Debit),
            "credit" | "cr" => Ok(Self::Credit),
            _ => Err(format!("Unknown direction: {s}")),
        }
    }
}

/// A balance as (magnitude, direction).
///
/// Invariant: `magnitude` is never negative. A zero balance is always
/// reported as Debit so that equal signed values compare equal.
/// Deserialization goes through [`BalanceRecord`] and enforces both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BalanceRecord")]
pub struct Balance {
    /// Absolute amount.
    pub magnitude: Decimal,
    /// Side the balance sits on.
    pub direction: Direction,
}

impl Balance {
    /// Zero balance.
    pub const ZERO: Self = Self {
        magnitude: Decimal::ZERO,
        direction: Direction::Debit,
    };

    /// Creates a balance from a magnitude and direction.
    ///
    /// Returns `None` when the magnitude is negative.
    #[must_use]
    pub fn new(magnitude: Decimal, direction: Direction) -> Option<Self> {
        if magnitude.is_sign_negative() && !magnitude.is_zero() {
            return None;
        }
        Some(Self::from_signed(direction.sign(magnitude)))
    }

    /// Creates a debit balance. Negative input is folded to the credit side.
    #[must_use]
    pub fn debit(magnitude: Decimal) -> Self {
        Self::from_signed(magnitude)
    }

    /// Creates a credit balance. Negative input is folded to the debit side.
    #[must_use]
    pub fn credit(magnitude: Decimal) -> Self {
        Self::from_signed(-magnitude)
    }

    /// Converts a signed value (positive = Debit) into the boundary form.
    #[must_use]
    pub fn from_signed(signed: Decimal) -> Self {
        if signed.is_sign_negative() && !signed.is_zero() {
            Self {
                magnitude: -signed,
                direction: Direction::Credit,
            }
        } else {
            Self {
                magnitude: signed.abs(),
                direction: Direction::Debit,
            }
        }
    }

    /// Returns the signed value (positive = Debit).
    #[must_use]
    pub fn signed(&self) -> Decimal {
        self.direction.sign(self.magnitude)
    }

    /// Returns true if the magnitude is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }
}

/// Loose balance shape as produced by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BalanceRecord {
    /// Stored magnitude, unchecked.
    pub magnitude: Decimal,
    /// Stored direction.
    pub direction: Direction,
}

impl TryFrom<BalanceRecord> for Balance {
    type Error = BalanceError;

    fn try_from(record: BalanceRecord) -> Result<Self, Self::Error> {
        Self::new(record.magnitude, record.direction)
            .ok_or(BalanceError::NegativeMagnitude(record.magnitude))
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.magnitude, self.direction.label())
    }
}
