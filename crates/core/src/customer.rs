//! Customer records.
//!
//! Customers are shared operational data referenced by quotes, invoices, and
//! work orders. They are never deleted while referenced; the store surfaces
//! that condition as a conflict.

use chrono::{DateTime, Utc};
use opsdesk_shared::types::CustomerId;
use serde::{Deserialize, Serialize};

/// Customer account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// Customer is active.
    Active,
    /// Customer is retained for history but no longer serviced.
    Inactive,
}

/// A customer of the service business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Account status.
    pub status: CustomerStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInput {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Account status; defaults to active on create.
    pub status: Option<CustomerStatus>,
}
