//! Inventory stock ledger rules.
//!
//! Tracks on-hand quantity per item, derives stock-status classification,
//! and validates adjustment operations. Stock status is always derived,
//! never stored.
//!
//! # Modules
//!
//! - `types` - Inventory item entity, stock status, inputs
//! - `ledger` - Classification and adjustment rules
//! - `error` - Inventory-specific error types

pub mod error;
pub mod ledger;
pub mod types;

pub use error::InventoryError;
pub use ledger::StockLedger;
pub use types::{InventoryItem, InventoryItemInput, InventoryItemPatch, StockStatus};
