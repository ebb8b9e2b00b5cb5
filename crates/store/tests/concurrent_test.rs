//! Concurrent allocation stress tests.
//!
//! Many threads creating documents at once must never observe a duplicate
//! number, and the resulting numbers must be contiguous.

mod common;

use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::thread;

use common::{setup, TestContext};
use opsdesk_core::quote::QuoteInput;
use opsdesk_core::workorder::WorkOrderInput;

const WORKERS: usize = 16;
const PER_WORKER: usize = 10;

fn quote_input(ctx: &TestContext) -> QuoteInput {
    QuoteInput {
        customer_id: ctx.customer_id,
        title: "Concurrent quote".to_string(),
        line_items: vec![],
        labor_hours: None,
        hourly_rate: None,
        valid_until: None,
        notes: None,
    }
}

#[test]
fn test_concurrent_quote_numbers_are_distinct_and_contiguous() {
    let ctx = Arc::new(setup());
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..PER_WORKER)
                    .map(|_| {
                        ctx.quotes
                            .create(&ctx.admin, quote_input(&ctx))
                            .expect("Failed to create quote")
                            .number
                            .as_str()
                            .to_string()
                    })
                    .collect::<Vec<String>>()
            })
        })
        .collect();

    let mut numbers = BTreeSet::new();
    for handle in handles {
        for number in handle.join().expect("worker panicked") {
            assert!(numbers.insert(number), "duplicate number handed out");
        }
    }

    let total = WORKERS * PER_WORKER;
    assert_eq!(numbers.len(), total);
    // Contiguous: exactly Q0001..Q{total}.
    for n in 1..=total {
        assert!(numbers.contains(&format!("Q{n:04}")));
    }
}

#[test]
fn test_concurrent_work_order_positions_stay_dense() {
    let ctx = Arc::new(setup());
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..PER_WORKER {
                    ctx.work_orders
                        .create(
                            &ctx.admin,
                            WorkOrderInput {
                                title: "Concurrent job".to_string(),
                                description: None,
                                customer_id: ctx.customer_id,
                                assignee_id: ctx.admin.id,
                                priority: None,
                                estimated_hours: None,
                                due_date: None,
                                materials: vec![],
                            },
                        )
                        .expect("Failed to create work order");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let total = u32::try_from(WORKERS * PER_WORKER).unwrap();
    let mut positions: Vec<u32> = ctx.store.work_orders.iter().map(|wo| wo.position).collect();
    positions.sort_unstable();
    let expected: Vec<u32> = (1..=total).collect();
    assert_eq!(positions, expected, "positions must form a dense 1..N permutation");
}
