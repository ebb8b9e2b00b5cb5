//! Work order state transition logic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::WorkOrderError;
use super::types::{WorkOrder, WorkOrderStatus};

/// The persistable outcome of a validated work order transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkOrderAction {
    /// The status to store.
    pub new_status: WorkOrderStatus,
    /// The started timestamp to store. Set on first entry to in-progress and
    /// carried unchanged afterwards.
    pub started_at: Option<DateTime<Utc>>,
    /// The completed timestamp to store. Set on first entry to completed and
    /// cleared by reopen.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Stateless service validating work order state transitions.
pub struct WorkOrderLifecycle;

impl WorkOrderLifecycle {
    /// Validates a requested status transition and resolves its side effects.
    ///
    /// Completion requires `actual_hours > 0`. Reopening a completed work
    /// order (back to in-progress) clears `completed_at` so a later
    /// completion stamps it afresh.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderError::InvalidTransition`] for any pair outside the
    /// allowed set and [`WorkOrderError::ZeroActualHours`] when completing
    /// without recorded hours.
    pub fn transition(
        work_order: &WorkOrder,
        to: WorkOrderStatus,
        now: DateTime<Utc>,
    ) -> Result<WorkOrderAction, WorkOrderError> {
        use WorkOrderStatus::{Completed, InProgress, Pending, Todo};

        let from = work_order.status;
        match (from, to) {
            (Todo, Pending) | (Pending, Todo) | (InProgress, Pending) => Ok(WorkOrderAction {
                new_status: to,
                started_at: work_order.started_at,
                completed_at: work_order.completed_at,
            }),
            (Todo | Pending, InProgress) => Ok(WorkOrderAction {
                new_status: InProgress,
                started_at: Some(work_order.started_at.unwrap_or(now)),
                completed_at: work_order.completed_at,
            }),
            (Todo | Pending | InProgress, Completed) => {
                let hours = work_order.actual_hours.unwrap_or(Decimal::ZERO);
                if hours <= Decimal::ZERO {
                    return Err(WorkOrderError::ZeroActualHours);
                }
                Ok(WorkOrderAction {
                    new_status: Completed,
                    started_at: work_order.started_at,
                    completed_at: Some(work_order.completed_at.unwrap_or(now)),
                })
            }
            // Reopen: back to the bench, completion timestamp cleared.
            (Completed, InProgress) => Ok(WorkOrderAction {
                new_status: InProgress,
                started_at: Some(work_order.started_at.unwrap_or(now)),
                completed_at: None,
            }),
            _ => Err(WorkOrderError::InvalidTransition { from, to }),
        }
    }

    /// Validates the numeric fields of an input or patch.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderError::NegativeHours`] or
    /// [`WorkOrderError::NegativeMaterialQuantity`].
    pub fn validate_hours(
        estimated: Option<Decimal>,
        actual: Option<Decimal>,
    ) -> Result<(), WorkOrderError> {
        for hours in [estimated, actual].into_iter().flatten() {
            if hours < Decimal::ZERO {
                return Err(WorkOrderError::NegativeHours);
            }
        }
        Ok(())
    }
}
