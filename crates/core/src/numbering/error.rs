//! Numbering error types.

use opsdesk_shared::AppError;
use thiserror::Error;

/// Errors that can occur during number allocation.
#[derive(Debug, Error)]
pub enum NumberingError {
    /// Allocation kept colliding with existing numbers and gave up.
    #[error("Identifier allocation exhausted for scope {scope}")]
    AllocationExhausted {
        /// The scope key that kept colliding.
        scope: String,
    },
}

impl From<NumberingError> for AppError {
    fn from(err: NumberingError) -> Self {
        match err {
            NumberingError::AllocationExhausted { scope } => Self::AllocationExhausted(scope),
        }
    }
}
