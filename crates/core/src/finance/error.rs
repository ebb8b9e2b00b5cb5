//! Financial calculation error types.

use opsdesk_shared::AppError;
use thiserror::Error;

/// Errors that can occur while computing document totals.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// A line item has a negative quantity.
    #[error("Line item '{name}' has a negative quantity")]
    NegativeQuantity {
        /// Name of the offending line item.
        name: String,
    },

    /// A line item has a negative unit price.
    #[error("Line item '{name}' has a negative unit price")]
    NegativeUnitPrice {
        /// Name of the offending line item.
        name: String,
    },

    /// Labor hours cannot be negative.
    #[error("Labor hours cannot be negative")]
    NegativeLaborHours,

    /// Hourly rate cannot be negative.
    #[error("Hourly rate cannot be negative")]
    NegativeHourlyRate,

    /// VAT rate cannot be negative.
    #[error("VAT rate cannot be negative")]
    NegativeVatRate,
}

impl From<FinanceError> for AppError {
    fn from(err: FinanceError) -> Self {
        Self::Validation(err.to_string())
    }
}
