//! Dashboard statistics.
//!
//! Pure, read-only reductions over current collections. No invariants of its
//! own beyond correct arithmetic; every rate and average is zero-safe.
//!
//! # Modules
//!
//! - `types` - Aggregated statistics structures
//! - `service` - The reductions themselves

pub mod service;
pub mod types;

pub use service::StatsService;
pub use types::{DashboardStats, InventoryStats, InvoiceStats, QuoteStats, WorkOrderStats};
