//! Invoice lifecycle management.
//!
//! An invoice is a billing document with a year-scoped sequential number and
//! a payment lifecycle. Overdue is a derived view state, never stored.
//!
//! # Modules
//!
//! - `types` - Invoice entity, status enumerations, inputs
//! - `lifecycle` - State transition logic, paid-at idempotence, derived overdue
//! - `error` - Invoice-specific error types

pub mod error;
pub mod lifecycle;
pub mod types;

#[cfg(test)]
mod lifecycle_props;

pub use error::InvoiceError;
pub use lifecycle::{InvoiceAction, InvoiceLifecycle};
pub use types::{Invoice, InvoiceDisplayStatus, InvoiceInput, InvoicePatch, InvoiceStatus};
