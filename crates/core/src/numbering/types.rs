//! Sequence scopes and number formats.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scope within which document numbers are unique and monotonic.
///
/// Quotes, work orders, and auto SKUs use one global sequence each; invoices
/// use one sequence per calendar year, resetting at the year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceScope {
    /// Quote numbers: `Q####`.
    Quote,
    /// Work order numbers: `WO####`.
    WorkOrder,
    /// Invoice numbers: `YYYY-####`, scoped to the given year.
    Invoice {
        /// The calendar year of creation.
        year: i32,
    },
    /// Automatic inventory SKUs: `INV-####`.
    Sku,
}

impl SequenceScope {
    /// Formats the `n`-th number in this scope.
    ///
    /// Numbers are zero-padded to 4 digits and simply grow wider past 9999.
    #[must_use]
    pub fn format(&self, n: u64) -> String {
        match self {
            Self::Quote => format!("Q{n:04}"),
            Self::WorkOrder => format!("WO{n:04}"),
            Self::Invoice { year } => format!("{year}-{n:04}"),
            Self::Sku => format!("INV-{n:04}"),
        }
    }

    /// Stable key identifying this scope in counter tables.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Quote => "quote".to_string(),
            Self::WorkOrder => "work_order".to_string(),
            Self::Invoice { year } => format!("invoice:{year}"),
            Self::Sku => "sku".to_string(),
        }
    }
}

impl fmt::Display for SequenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
