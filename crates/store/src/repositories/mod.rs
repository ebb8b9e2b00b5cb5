//! Repository abstractions over the in-process store.
//!
//! Every repository applies the same sequence on mutations: ownership policy
//! first, then lifecycle validation, then totals recomputation where
//! financial inputs changed, then a single atomic store write. Member misses
//! surface as `NotFound` so record existence never leaks.

pub mod customer;
pub mod dashboard;
pub mod inventory;
pub mod invoice;
pub mod quote;
pub mod work_order;

pub use customer::{CustomerFilter, CustomerRepository};
pub use dashboard::DashboardRepository;
pub use inventory::{InventoryFilter, InventoryRepository};
pub use invoice::{InvoiceFilter, InvoiceRepository};
pub use quote::{QuoteFilter, QuoteRepository};
pub use work_order::{WorkOrderFilter, WorkOrderRepository};
