//! Property-based tests for the work order state machine.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use opsdesk_shared::types::{CustomerId, UserId, WorkOrderNumber};

use crate::workorder::lifecycle::WorkOrderLifecycle;
use crate::workorder::types::{WorkOrder, WorkOrderStatus};

fn arb_status() -> impl Strategy<Value = WorkOrderStatus> {
    prop_oneof![
        Just(WorkOrderStatus::Todo),
        Just(WorkOrderStatus::Pending),
        Just(WorkOrderStatus::InProgress),
        Just(WorkOrderStatus::Completed),
    ]
}

fn work_order(status: WorkOrderStatus, actual_hours: Decimal) -> WorkOrder {
    let now = Utc::now();
    WorkOrder {
        number: WorkOrderNumber::new("WO0001"),
        title: "Job".to_string(),
        description: None,
        customer_id: CustomerId::new(),
        assignee_id: UserId::new(),
        created_by: UserId::new(),
        status,
        priority: None,
        estimated_hours: None,
        actual_hours: Some(actual_hours),
        due_date: None,
        started_at: None,
        completed_at: None,
        position: 1,
        materials: vec![],
        created_at: now,
        updated_at: now,
    }
}

/// The transition table, written out once for cross-checking.
fn is_allowed(from: WorkOrderStatus, to: WorkOrderStatus) -> bool {
    use WorkOrderStatus::{Completed, InProgress, Pending, Todo};
    matches!(
        (from, to),
        (Todo, Pending)
            | (Pending, Todo)
            | (Todo | Pending, InProgress)
            | (InProgress, Pending)
            | (Todo | Pending | InProgress, Completed)
            | (Completed, InProgress)
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// With positive hours, acceptance matches the table exactly.
    #[test]
    fn prop_transition_matches_table(from in arb_status(), to in arb_status()) {
        let wo = work_order(from, Decimal::ONE);
        let result = WorkOrderLifecycle::transition(&wo, to, Utc::now());
        prop_assert_eq!(result.is_ok(), is_allowed(from, to));
    }

    /// With zero hours, completion is rejected and everything else is
    /// unaffected.
    #[test]
    fn prop_zero_hours_only_blocks_completion(from in arb_status(), to in arb_status()) {
        let wo = work_order(from, Decimal::ZERO);
        let result = WorkOrderLifecycle::transition(&wo, to, Utc::now());
        if to == WorkOrderStatus::Completed && is_allowed(from, to) {
            prop_assert!(result.is_err());
        } else {
            prop_assert_eq!(result.is_ok(), is_allowed(from, to));
        }
    }

    /// Successful transitions into in-progress always carry a started_at.
    #[test]
    fn prop_in_progress_always_started(from in arb_status()) {
        let wo = work_order(from, Decimal::ONE);
        if let Ok(action) = WorkOrderLifecycle::transition(&wo, WorkOrderStatus::InProgress, Utc::now()) {
            prop_assert!(action.started_at.is_some());
            prop_assert_eq!(action.completed_at, None);
        }
    }
}
