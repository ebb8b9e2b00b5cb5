//! Sequential document number allocation.
//!
//! Every document kind draws from its own monotonic sequence; invoices draw
//! from a sequence per calendar year. The atomic reserve primitive itself is
//! owned by the store. This module defines the scopes, the number formats,
//! and the bounded retry loop that re-checks uniqueness before committing to
//! a candidate.

pub mod allocator;
pub mod error;
pub mod types;

pub use allocator::{MAX_ALLOCATION_ATTEMPTS, allocate_with};
pub use error::NumberingError;
pub use types::SequenceScope;
