//! Ownership and visibility policy.
//!
//! Every repository operation consults this module before touching a record.
//! Admins are unrestricted; members only see and mutate their own documents,
//! and records outside a member's scope surface as `NotFound` so their
//! existence is never leaked.

pub mod service;
pub mod types;

pub use service::OwnershipPolicy;
pub use types::{Actor, Decision, Operation, Role};
