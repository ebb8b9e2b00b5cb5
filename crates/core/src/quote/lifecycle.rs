//! Quote state transition logic.

use chrono::NaiveDate;

use super::error::QuoteError;
use super::types::{Quote, QuoteStatus};

/// Stateless service validating quote state transitions.
pub struct QuoteLifecycle;

impl QuoteLifecycle {
    /// Validates a requested status transition.
    ///
    /// Expiry is not a user action; requesting `Expired` is always rejected.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidTransition`] for any pair outside the
    /// allowed set.
    pub fn transition(from: QuoteStatus, to: QuoteStatus) -> Result<(), QuoteError> {
        match (from, to) {
            (QuoteStatus::Draft, QuoteStatus::Sent)
            | (QuoteStatus::Sent, QuoteStatus::Approved | QuoteStatus::Rejected) => Ok(()),
            _ => Err(QuoteError::InvalidTransition { from, to }),
        }
    }

    /// Validates that a quote's content may still be edited.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::NotEditable`] for terminal statuses.
    pub fn ensure_editable(status: QuoteStatus) -> Result<(), QuoteError> {
        if status.is_terminal() {
            return Err(QuoteError::NotEditable(status));
        }
        Ok(())
    }

    /// Validates that a quote can be converted to a work order or invoice.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::NotApproved`] unless the quote is approved.
    pub fn ensure_convertible(status: QuoteStatus) -> Result<(), QuoteError> {
        if status == QuoteStatus::Approved {
            Ok(())
        } else {
            Err(QuoteError::NotApproved(status))
        }
    }

    /// The status a reader should see today.
    ///
    /// A sent quote whose validity date has passed displays as expired. This
    /// is a read-time check, not a stored transition.
    #[must_use]
    pub fn display_status(quote: &Quote, today: NaiveDate) -> QuoteStatus {
        match (quote.status, quote.valid_until) {
            (QuoteStatus::Sent, Some(valid_until)) if valid_until < today => QuoteStatus::Expired,
            (status, _) => status,
        }
    }
}
