//! Invoice domain types.

use chrono::{DateTime, NaiveDate, Utc};
use opsdesk_shared::types::{CustomerId, InvoiceNumber, QuoteNumber, UserId, WorkOrderNumber};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::finance::{LineItem, Totals};

/// Stored invoice status.
///
/// The valid transitions are:
/// - Draft → Sent (send)
/// - Draft | Sent → Paid (mark paid; repeat calls are idempotent)
/// - Draft | Sent → Cancelled (cancel)
///
/// Overdue is never stored; see [`InvoiceDisplayStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice is being drafted.
    Draft,
    /// Invoice has been sent to the customer.
    Sent,
    /// Invoice has been paid (terminal).
    Paid,
    /// Invoice has been cancelled (terminal).
    Cancelled,
}

impl InvoiceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "paid" => Some(Self::Paid),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if the invoice has reached a terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Returns true if the invoice still counts toward outstanding amounts.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Draft | Self::Sent)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The status a reader sees: the stored status, with `Overdue` substituted
/// when an unpaid invoice's due date has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceDisplayStatus {
    /// Invoice is being drafted.
    Draft,
    /// Invoice has been sent to the customer.
    Sent,
    /// Invoice has been paid.
    Paid,
    /// Invoice has been cancelled.
    Cancelled,
    /// Unpaid past its due date (derived).
    Overdue,
}

/// A billing document with a payment lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Year-scoped sequential number, assigned once at creation.
    pub number: InvoiceNumber,
    /// The customer being billed.
    pub customer_id: CustomerId,
    /// The user who created the invoice (its owner).
    pub owner_id: UserId,
    /// Originating quote, if any.
    pub quote: Option<QuoteNumber>,
    /// Related work order, if any.
    pub work_order: Option<WorkOrderNumber>,
    /// Current stored status.
    pub status: InvoiceStatus,
    /// Priced lines.
    pub line_items: Vec<LineItem>,
    /// Billed labor hours.
    pub labor_hours: Option<Decimal>,
    /// Hourly labor rate; `None` uses the business default.
    pub hourly_rate: Option<Decimal>,
    /// VAT rate in percent applied at computation time.
    pub vat_rate_percent: Decimal,
    /// Computed totals; always derived, never accepted as input.
    pub totals: Totals,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// When the invoice was paid. Set once, on the first transition to paid.
    pub paid_at: Option<DateTime<Utc>>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceInput {
    /// The customer being billed.
    pub customer_id: CustomerId,
    /// Priced lines.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Billed labor hours.
    pub labor_hours: Option<Decimal>,
    /// Hourly labor rate; `None` uses the business default.
    pub hourly_rate: Option<Decimal>,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Partial update for an invoice. Absent fields are left untouched.
///
/// A present field always carries a replacement value; a patch cannot clear
/// a set field back to none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoicePatch {
    /// New customer reference.
    pub customer_id: Option<CustomerId>,
    /// Replacement line items.
    pub line_items: Option<Vec<LineItem>>,
    /// New labor hours.
    pub labor_hours: Option<Decimal>,
    /// New hourly rate.
    pub hourly_rate: Option<Decimal>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New notes.
    pub notes: Option<String>,
}

impl InvoicePatch {
    /// Returns true if the patch touches any input of the totals computation.
    #[must_use]
    pub fn changes_financials(&self) -> bool {
        self.line_items.is_some() || self.labor_hours.is_some() || self.hourly_rate.is_some()
    }
}
