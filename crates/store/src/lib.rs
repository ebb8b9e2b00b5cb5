//! Storage layer with the in-process store and per-entity repositories.
//!
//! This crate provides:
//! - [`MemStore`], the concurrent in-process store (collections, sequence
//!   counters, queue and SKU locks)
//! - Repository abstractions applying ownership policy, lifecycle rules, and
//!   totals recomputation uniformly on every operation

pub mod memory;
pub mod repositories;

pub use memory::MemStore;
pub use repositories::{
    CustomerRepository, DashboardRepository, InventoryRepository, InvoiceRepository,
    QuoteRepository, WorkOrderRepository,
};
