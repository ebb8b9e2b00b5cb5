//! Invoice error types.

use opsdesk_shared::AppError;
use thiserror::Error;

use super::types::InvoiceStatus;

/// Errors that can occur during invoice operations.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: InvoiceStatus,
        /// The attempted target status.
        to: InvoiceStatus,
    },

    /// Attempted to edit an invoice in a terminal status.
    #[error("Cannot edit an invoice in {0} status")]
    NotEditable(InvoiceStatus),
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::InvalidTransition { from, to } => Self::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            },
            InvoiceError::NotEditable(_) => Self::PreconditionFailed(err.to_string()),
        }
    }
}
