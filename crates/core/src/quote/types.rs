//! Quote domain types.

use chrono::{DateTime, NaiveDate, Utc};
use opsdesk_shared::types::{CustomerId, InvoiceNumber, QuoteNumber, UserId, WorkOrderNumber};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::finance::{LineItem, Totals};

/// Quote status.
///
/// The valid stored transitions are:
/// - Draft → Sent (send)
/// - Sent → Approved (approve)
/// - Sent → Rejected (reject)
///
/// `Expired` is derived at read time from `valid_until`; it is never written
/// by a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    /// Quote is being drafted.
    Draft,
    /// Quote has been sent to the customer.
    Sent,
    /// Customer approved the quote (terminal).
    Approved,
    /// Customer rejected the quote (terminal).
    Rejected,
    /// Validity date passed before a decision (terminal, derived).
    Expired,
}

impl QuoteStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Expired)
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A priced proposal sent to a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Sequential quote number, assigned once at creation.
    pub number: QuoteNumber,
    /// The customer this quote is for.
    pub customer_id: CustomerId,
    /// The user who created the quote (its owner).
    pub owner_id: UserId,
    /// Short title.
    pub title: String,
    /// Current stored status.
    pub status: QuoteStatus,
    /// Priced lines.
    pub line_items: Vec<LineItem>,
    /// Estimated labor hours.
    pub labor_hours: Option<Decimal>,
    /// Hourly labor rate; `None` uses the business default.
    pub hourly_rate: Option<Decimal>,
    /// VAT rate in percent applied at computation time.
    pub vat_rate_percent: Decimal,
    /// Computed totals; always derived, never accepted as input.
    pub totals: Totals,
    /// Work order created from this quote, if converted.
    pub work_order: Option<WorkOrderNumber>,
    /// Invoice created from this quote, if converted.
    pub invoice: Option<InvoiceNumber>,
    /// Date until which the quote is valid.
    pub valid_until: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteInput {
    /// The customer this quote is for.
    pub customer_id: CustomerId,
    /// Short title.
    pub title: String,
    /// Priced lines.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Estimated labor hours.
    pub labor_hours: Option<Decimal>,
    /// Hourly labor rate; `None` uses the business default.
    pub hourly_rate: Option<Decimal>,
    /// Date until which the quote is valid.
    pub valid_until: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Partial update for a quote. Absent fields are left untouched.
///
/// A present field always carries a replacement value; a patch cannot clear
/// a set field back to none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotePatch {
    /// New title.
    pub title: Option<String>,
    /// New customer reference.
    pub customer_id: Option<CustomerId>,
    /// Replacement line items.
    pub line_items: Option<Vec<LineItem>>,
    /// New labor hours.
    pub labor_hours: Option<Decimal>,
    /// New hourly rate.
    pub hourly_rate: Option<Decimal>,
    /// New validity date.
    pub valid_until: Option<NaiveDate>,
    /// New notes.
    pub notes: Option<String>,
}

impl QuotePatch {
    /// Returns true if the patch touches any input of the totals computation.
    #[must_use]
    pub fn changes_financials(&self) -> bool {
        self.line_items.is_some() || self.labor_hours.is_some() || self.hourly_rate.is_some()
    }
}
