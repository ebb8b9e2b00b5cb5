//! Quote lifecycle management.
//!
//! A quote is a priced proposal sent to a customer, convertible into a work
//! order and/or invoice once approved.
//!
//! # Modules
//!
//! - `types` - Quote entity, status enumeration, inputs
//! - `lifecycle` - State transition logic and derived expiry
//! - `error` - Quote-specific error types

pub mod error;
pub mod lifecycle;
pub mod types;

#[cfg(test)]
mod lifecycle_props;

pub use error::QuoteError;
pub use lifecycle::QuoteLifecycle;
pub use types::{Quote, QuoteInput, QuotePatch, QuoteStatus};
