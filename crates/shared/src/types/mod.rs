//! Common types used across the application.

pub mod id;
pub mod number;
pub mod pagination;

pub use id::*;
pub use number::*;
pub use pagination::{PageRequest, PageResponse};
