//! Application-wide error types.
//!
//! Every business error surfaced by the repositories maps onto one of these
//! variants. The variant kind is stable for programmatic handling; the message
//! is for humans.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found, or outside the actor's visibility.
    ///
    /// A record the actor may not see and a record that does not exist are
    /// intentionally indistinguishable, so existence is never leaked.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Actor is authenticated but the policy denies the action.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Unique-constraint collision or conflicting reference.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The state machine rejects the requested status change.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: String,
        /// The attempted target status.
        to: String,
    },

    /// A business precondition for the operation is not met.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// An inventory adjustment would drive quantity below zero.
    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock {
        /// Quantity currently on hand.
        available: Decimal,
        /// Quantity the adjustment tried to remove.
        requested: Decimal,
    },

    /// Identifier allocation gave up after repeated collisions.
    #[error("Identifier allocation exhausted for scope {0}")]
    AllocationExhausted(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP-equivalent status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Forbidden(_) => 403,
            Self::Conflict(_) => 409,
            Self::InvalidTransition { .. }
            | Self::PreconditionFailed(_)
            | Self::InsufficientStock { .. } => 422,
            Self::AllocationExhausted(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the stable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::PreconditionFailed(_) => "PRECONDITION_FAILED",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::AllocationExhausted(_) => "ALLOCATION_EXHAUSTED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
