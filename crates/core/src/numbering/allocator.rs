//! Bounded-retry allocation over an injected atomic sequence.
//!
//! The "count existing rows + 1" approach races under concurrency. The store
//! therefore provides an atomic reserve-and-increment primitive per scope;
//! this function wraps it with a uniqueness re-check and a bounded retry so a
//! lost race never hands out a duplicate number.

use super::error::NumberingError;
use super::types::SequenceScope;

/// Default attempt bound, used when no configured value applies.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 5;

/// Allocates the next unique number in `scope`.
///
/// `reserve` must atomically reserve and return the next sequence value for
/// the scope (never returning the same value twice). `is_taken` re-checks the
/// formatted candidate against the store's uniqueness constraint, closing the
/// window where a pre-existing record (e.g. imported data) already carries
/// the candidate number.
///
/// # Errors
///
/// Returns [`NumberingError::AllocationExhausted`] when every candidate in
/// `attempts` tries was already taken.
pub fn allocate_with<R, T>(
    scope: SequenceScope,
    attempts: u32,
    mut reserve: R,
    is_taken: T,
) -> Result<String, NumberingError>
where
    R: FnMut() -> u64,
    T: Fn(&str) -> bool,
{
    for _ in 0..attempts {
        let candidate = scope.format(reserve());
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }

    Err(NumberingError::AllocationExhausted { scope: scope.key() })
}
