//! Integration tests for the work order repository.
//!
//! Covers queue positions, lifecycle side effects, and assignee visibility.

mod common;

use common::setup;
use opsdesk_core::workorder::{WorkOrderInput, WorkOrderPatch, WorkOrderStatus};
use opsdesk_shared::AppError;
use opsdesk_shared::types::{PageRequest, UserId, WorkOrderNumber};
use opsdesk_store::repositories::WorkOrderFilter;
use rust_decimal_macros::dec;

fn work_order_input(ctx: &common::TestContext, assignee: UserId) -> WorkOrderInput {
    WorkOrderInput {
        title: "Replace radiator valve".to_string(),
        description: None,
        customer_id: ctx.customer_id,
        assignee_id: assignee,
        priority: None,
        estimated_hours: Some(dec!(2)),
        due_date: None,
        materials: vec![],
    }
}

#[test]
fn test_create_appends_to_queue() {
    let ctx = setup();
    for expected in 1..=3u32 {
        let wo = ctx
            .work_orders
            .create(&ctx.admin, work_order_input(&ctx, ctx.admin.id))
            .unwrap();
        assert_eq!(wo.position, expected);
        assert_eq!(wo.status, WorkOrderStatus::Todo);
    }
}

#[test]
fn test_move_keeps_dense_permutation() {
    let ctx = setup();
    for _ in 0..5 {
        ctx.work_orders
            .create(&ctx.admin, work_order_input(&ctx, ctx.admin.id))
            .unwrap();
    }

    let moved = ctx
        .work_orders
        .move_position(&ctx.admin, &WorkOrderNumber::from("WO0003"), 1)
        .unwrap();
    assert_eq!(moved.position, 1);

    let page = ctx
        .work_orders
        .list(&ctx.admin, &WorkOrderFilter::default(), &PageRequest::default())
        .unwrap();
    let order: Vec<(&str, u32)> = page
        .data
        .iter()
        .map(|wo| (wo.number.as_str(), wo.position))
        .collect();
    assert_eq!(
        order,
        vec![
            ("WO0003", 1),
            ("WO0001", 2),
            ("WO0002", 3),
            ("WO0004", 4),
            ("WO0005", 5),
        ]
    );
}

#[test]
fn test_move_out_of_range_rejected() {
    let ctx = setup();
    let wo = ctx
        .work_orders
        .create(&ctx.admin, work_order_input(&ctx, ctx.admin.id))
        .unwrap();
    let err = ctx
        .work_orders
        .move_position(&ctx.admin, &wo.number, 2)
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_delete_closes_queue_gap() {
    let ctx = setup();
    for _ in 0..4 {
        ctx.work_orders
            .create(&ctx.admin, work_order_input(&ctx, ctx.admin.id))
            .unwrap();
    }
    ctx.work_orders
        .delete(&ctx.admin, &WorkOrderNumber::from("WO0002"))
        .unwrap();

    let page = ctx
        .work_orders
        .list(&ctx.admin, &WorkOrderFilter::default(), &PageRequest::default())
        .unwrap();
    let positions: Vec<u32> = page.data.iter().map(|wo| wo.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[test]
fn test_completion_requires_recorded_hours() {
    let ctx = setup();
    let wo = ctx
        .work_orders
        .create(&ctx.admin, work_order_input(&ctx, ctx.admin.id))
        .unwrap();
    ctx.work_orders
        .transition(&ctx.admin, &wo.number, WorkOrderStatus::InProgress)
        .unwrap();

    let err = ctx
        .work_orders
        .transition(&ctx.admin, &wo.number, WorkOrderStatus::Completed)
        .unwrap_err();
    assert!(matches!(err, AppError::PreconditionFailed(_)));

    ctx.work_orders
        .update(
            &ctx.admin,
            &wo.number,
            WorkOrderPatch {
                actual_hours: Some(dec!(3.5)),
                ..WorkOrderPatch::default()
            },
        )
        .unwrap();
    let completed = ctx
        .work_orders
        .transition(&ctx.admin, &wo.number, WorkOrderStatus::Completed)
        .unwrap();
    assert_eq!(completed.status, WorkOrderStatus::Completed);
    assert!(completed.completed_at.is_some());
}

#[test]
fn test_reopen_clears_completed_at() {
    let ctx = setup();
    let wo = ctx
        .work_orders
        .create(&ctx.admin, work_order_input(&ctx, ctx.admin.id))
        .unwrap();
    ctx.work_orders
        .update(
            &ctx.admin,
            &wo.number,
            WorkOrderPatch {
                actual_hours: Some(dec!(1)),
                ..WorkOrderPatch::default()
            },
        )
        .unwrap();
    ctx.work_orders
        .transition(&ctx.admin, &wo.number, WorkOrderStatus::Completed)
        .unwrap();

    let reopened = ctx
        .work_orders
        .transition(&ctx.admin, &wo.number, WorkOrderStatus::InProgress)
        .unwrap();
    assert_eq!(reopened.completed_at, None);
    assert!(reopened.started_at.is_some());
}

#[test]
fn test_assignee_is_the_owner_for_visibility() {
    let ctx = setup();
    let foreign = ctx
        .work_orders
        .create(&ctx.admin, work_order_input(&ctx, ctx.admin.id))
        .unwrap();
    let own = ctx
        .work_orders
        .create(&ctx.admin, work_order_input(&ctx, ctx.member.id))
        .unwrap();

    let err = ctx.work_orders.get(&ctx.member, &foreign.number).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let page = ctx
        .work_orders
        .list(&ctx.member, &WorkOrderFilter::default(), &PageRequest::default())
        .unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].number, own.number);

    // Assignees may delete their own work orders.
    ctx.work_orders.delete(&ctx.member, &own.number).unwrap();
}

#[test]
fn test_empty_patch_leaves_fields_untouched() {
    let ctx = setup();
    let wo = ctx
        .work_orders
        .create(
            &ctx.admin,
            WorkOrderInput {
                priority: Some(opsdesk_core::workorder::Priority::High),
                ..work_order_input(&ctx, ctx.admin.id)
            },
        )
        .unwrap();

    let updated = ctx
        .work_orders
        .update(&ctx.admin, &wo.number, WorkOrderPatch::default())
        .unwrap();
    assert_eq!(updated.priority, wo.priority);
    assert_eq!(updated.estimated_hours, wo.estimated_hours);
    assert_eq!(updated.due_date, wo.due_date);
}

#[test]
fn test_negative_hours_rejected() {
    let ctx = setup();
    let wo = ctx
        .work_orders
        .create(&ctx.admin, work_order_input(&ctx, ctx.admin.id))
        .unwrap();
    let err = ctx
        .work_orders
        .update(
            &ctx.admin,
            &wo.number,
            WorkOrderPatch {
                actual_hours: Some(dec!(-1)),
                ..WorkOrderPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
