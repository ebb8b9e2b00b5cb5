//! Invoice state transition logic.

use chrono::{DateTime, NaiveDate, Utc};

use super::error::InvoiceError;
use super::types::{Invoice, InvoiceDisplayStatus, InvoiceStatus};

/// The persistable outcome of a validated invoice transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceAction {
    /// The status to store.
    pub new_status: InvoiceStatus,
    /// The paid timestamp to store. Carries the existing value unchanged for
    /// every transition except the first entry into paid.
    pub paid_at: Option<DateTime<Utc>>,
}

/// Stateless service validating invoice state transitions.
pub struct InvoiceLifecycle;

impl InvoiceLifecycle {
    /// Validates a requested status transition and resolves its side effects.
    ///
    /// Entering `Paid` sets `paid_at` exactly once: a repeated `Paid`
    /// transition is accepted as a no-op and returns the existing timestamp
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::InvalidTransition`] for any pair outside the
    /// allowed set.
    pub fn transition(
        invoice: &Invoice,
        to: InvoiceStatus,
        now: DateTime<Utc>,
    ) -> Result<InvoiceAction, InvoiceError> {
        let from = invoice.status;
        match (from, to) {
            // Re-marking a paid invoice as paid is idempotent.
            (InvoiceStatus::Paid, InvoiceStatus::Paid) => Ok(InvoiceAction {
                new_status: InvoiceStatus::Paid,
                paid_at: invoice.paid_at,
            }),
            (InvoiceStatus::Draft | InvoiceStatus::Sent, InvoiceStatus::Paid) => {
                Ok(InvoiceAction {
                    new_status: InvoiceStatus::Paid,
                    paid_at: Some(invoice.paid_at.unwrap_or(now)),
                })
            }
            (InvoiceStatus::Draft, InvoiceStatus::Sent)
            | (InvoiceStatus::Draft | InvoiceStatus::Sent, InvoiceStatus::Cancelled) => {
                Ok(InvoiceAction {
                    new_status: to,
                    paid_at: invoice.paid_at,
                })
            }
            _ => Err(InvoiceError::InvalidTransition { from, to }),
        }
    }

    /// Validates that an invoice's content may still be edited.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::NotEditable`] for terminal statuses.
    pub fn ensure_editable(status: InvoiceStatus) -> Result<(), InvoiceError> {
        if status.is_terminal() {
            return Err(InvoiceError::NotEditable(status));
        }
        Ok(())
    }

    /// Returns true if the invoice is unpaid and past its due date.
    #[must_use]
    pub fn is_overdue(invoice: &Invoice, today: NaiveDate) -> bool {
        invoice.status.is_outstanding()
            && invoice.due_date.is_some_and(|due| due < today)
    }

    /// The status a reader should see today.
    #[must_use]
    pub fn display_status(invoice: &Invoice, today: NaiveDate) -> InvoiceDisplayStatus {
        if Self::is_overdue(invoice, today) {
            return InvoiceDisplayStatus::Overdue;
        }
        match invoice.status {
            InvoiceStatus::Draft => InvoiceDisplayStatus::Draft,
            InvoiceStatus::Sent => InvoiceDisplayStatus::Sent,
            InvoiceStatus::Paid => InvoiceDisplayStatus::Paid,
            InvoiceStatus::Cancelled => InvoiceDisplayStatus::Cancelled,
        }
    }
}
