//! Quote error types.

use opsdesk_shared::AppError;
use opsdesk_shared::types::InvoiceNumber;
use thiserror::Error;

use super::types::QuoteStatus;

/// Errors that can occur during quote operations.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: QuoteStatus,
        /// The attempted target status.
        to: QuoteStatus,
    },

    /// Attempted to edit a quote in a terminal status.
    #[error("Cannot edit a quote in {0} status")]
    NotEditable(QuoteStatus),

    /// Attempted to delete a quote that is linked to an invoice.
    #[error("Quote is linked to invoice {0} and cannot be deleted")]
    LinkedToInvoice(InvoiceNumber),

    /// Conversion requires an approved quote.
    #[error("Quote must be approved before conversion, current status is {0}")]
    NotApproved(QuoteStatus),

    /// The quote already carries the requested cross-link.
    #[error("Quote was already converted, link to {0} exists")]
    AlreadyConverted(String),
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::InvalidTransition { from, to } => Self::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            },
            QuoteError::NotEditable(_) | QuoteError::NotApproved(_) => {
                Self::PreconditionFailed(err.to_string())
            }
            QuoteError::LinkedToInvoice(_) | QuoteError::AlreadyConverted(_) => {
                Self::Conflict(err.to_string())
            }
        }
    }
}
