//! Work order lifecycle and queue ordering.
//!
//! A work order is a unit of field work with an assignee, materials, hour
//! tracking, and a position in the shared work queue.
//!
//! # Modules
//!
//! - `types` - Work order entity, status and priority enumerations, inputs
//! - `lifecycle` - State transition logic with set-once timestamps
//! - `queue` - Dense position index planning for reorders
//! - `error` - Work-order-specific error types

pub mod error;
pub mod lifecycle;
pub mod queue;
pub mod types;

#[cfg(test)]
mod lifecycle_props;
#[cfg(test)]
mod queue_props;

pub use error::WorkOrderError;
pub use lifecycle::{WorkOrderAction, WorkOrderLifecycle};
pub use queue::WorkQueue;
pub use types::{Material, Priority, WorkOrder, WorkOrderInput, WorkOrderPatch, WorkOrderStatus};
