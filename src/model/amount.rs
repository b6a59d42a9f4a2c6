//! Amount type for budget figures.
//!
//! Source CSV files state figures in thousands of yen. This module provides the `Amount` type,
//! which always holds base units (yen), and handles parsing the thousand-unit cells found in the
//! raw files.

use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// The number of base currency units in one source unit.
pub const THOUSAND: i64 = 1000;

/// Represents an amount of money in base currency units.
///
/// # Examples
///
/// Parsing a thousand-unit cell:
/// ```
/// # use budget_json::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("5").unwrap();
/// assert_eq!(amount.value(), 5000);
/// ```
///
/// Malformed cells are treated as zero when read leniently:
/// ```
/// # use budget_json::model::Amount;
/// assert_eq!(Amount::from_cell(Some("1.5")).value(), 0);
/// assert_eq!(Amount::from_cell(None).value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates a new `Amount` from a value that is already in base units.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the value in base units.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Reads a raw cell without failing. An absent, empty or malformed cell is zero.
    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell {
            Some(raw) if !raw.is_empty() => Amount::from_str(raw).unwrap_or_default(),
            _ => Amount::ZERO,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }
}

/// An error that can occur when parsing a thousand-unit cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The cell held nothing but whitespace.
    Empty,
    /// The cell is not an integer.
    Invalid(ParseIntError),
    /// The cell is an integer, but it does not fit once converted to base units.
    Overflow(i64),
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Empty => write!(f, "empty amount"),
            AmountError::Invalid(e) => write!(f, "invalid amount: {e}"),
            AmountError::Overflow(n) => write!(f, "amount {n} overflows when converted to yen"),
        }
    }
}

impl Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AmountError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a figure stated in thousands and converts it to base units.
    ///
    /// Only an optional sign and ASCII digits are accepted, so forms like `1_000` or full-width
    /// digits are errors (and read as zero by `from_cell`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }
        let thousands = trimmed.parse::<i64>().map_err(AmountError::Invalid)?;
        thousands
            .checked_mul(THOUSAND)
            .map(Amount)
            .ok_or(AmountError::Overflow(thousands))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{}",
            format_num::format_num!(",.0", self.0.unsigned_abs() as f64)
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}
