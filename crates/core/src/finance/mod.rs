//! Financial calculations shared by quotes and invoices.
//!
//! This module implements the single deterministic path from line items and
//! labor inputs to document totals. Stored totals are never accepted as
//! input; they are always recomputed here.

pub mod calculator;
pub mod error;
pub mod types;

pub use calculator::FinanceCalculator;
pub use error::FinanceError;
pub use types::{LineItem, Totals};
