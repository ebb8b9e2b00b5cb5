//! Work order error types.

use opsdesk_shared::AppError;
use thiserror::Error;

use super::types::WorkOrderStatus;

/// Errors that can occur during work order operations.
#[derive(Debug, Error)]
pub enum WorkOrderError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: WorkOrderStatus,
        /// The attempted target status.
        to: WorkOrderStatus,
    },

    /// Completion requires actual hours to be recorded.
    #[error("Cannot complete a work order without actual hours")]
    ZeroActualHours,

    /// Actual or estimated hours cannot be negative.
    #[error("Work order hours cannot be negative")]
    NegativeHours,

    /// A material line has a negative quantity.
    #[error("Material quantity cannot be negative")]
    NegativeMaterialQuantity,

    /// The requested queue position does not exist.
    #[error("Queue position {requested} is out of range 1..={len}")]
    PositionOutOfRange {
        /// The requested position.
        requested: u32,
        /// Current queue length.
        len: u32,
    },

    /// The move target is not present in the queue.
    #[error("Work order {0} is not in the queue")]
    NotInQueue(String),
}

impl From<WorkOrderError> for AppError {
    fn from(err: WorkOrderError) -> Self {
        match err {
            WorkOrderError::InvalidTransition { from, to } => Self::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            },
            WorkOrderError::ZeroActualHours => Self::PreconditionFailed(err.to_string()),
            WorkOrderError::NegativeHours
            | WorkOrderError::NegativeMaterialQuantity
            | WorkOrderError::PositionOutOfRange { .. } => Self::Validation(err.to_string()),
            WorkOrderError::NotInQueue(number) => Self::NotFound(format!("work order {number}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        let app: AppError = WorkOrderError::ZeroActualHours.into();
        assert_eq!(app.error_code(), "PRECONDITION_FAILED");

        let app: AppError = WorkOrderError::InvalidTransition {
            from: WorkOrderStatus::Completed,
            to: WorkOrderStatus::Todo,
        }
        .into();
        assert_eq!(app.error_code(), "INVALID_TRANSITION");

        let app: AppError = WorkOrderError::PositionOutOfRange {
            requested: 9,
            len: 3,
        }
        .into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
        assert_eq!(app.to_string(), "Validation error: Queue position 9 is out of range 1..=3");

        let app: AppError = WorkOrderError::NotInQueue("WO0009".to_string()).into();
        assert_eq!(app.error_code(), "NOT_FOUND");
    }
}
