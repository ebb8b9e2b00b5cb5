//! Property-based tests for the invoice state machine.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use opsdesk_shared::types::{CustomerId, InvoiceNumber, UserId};

use crate::finance::Totals;
use crate::invoice::lifecycle::InvoiceLifecycle;
use crate::invoice::types::{Invoice, InvoiceStatus};

fn arb_status() -> impl Strategy<Value = InvoiceStatus> {
    prop_oneof![
        Just(InvoiceStatus::Draft),
        Just(InvoiceStatus::Sent),
        Just(InvoiceStatus::Paid),
        Just(InvoiceStatus::Cancelled),
    ]
}

fn invoice(status: InvoiceStatus) -> Invoice {
    let now = Utc::now();
    Invoice {
        number: InvoiceNumber::new("2026-0001"),
        customer_id: CustomerId::new(),
        owner_id: UserId::new(),
        quote: None,
        work_order: None,
        status,
        line_items: vec![],
        labor_hours: None,
        hourly_rate: None,
        vat_rate_percent: Decimal::from(21),
        totals: Totals::zero(),
        due_date: None,
        paid_at: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

/// The transition table, written out once for cross-checking. The idempotent
/// paid-to-paid no-op counts as allowed.
fn is_allowed(from: InvoiceStatus, to: InvoiceStatus) -> bool {
    matches!(
        (from, to),
        (InvoiceStatus::Draft, InvoiceStatus::Sent)
            | (
                InvoiceStatus::Draft | InvoiceStatus::Sent,
                InvoiceStatus::Paid | InvoiceStatus::Cancelled
            )
            | (InvoiceStatus::Paid, InvoiceStatus::Paid)
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_transition_matches_table(from in arb_status(), to in arb_status()) {
        let result = InvoiceLifecycle::transition(&invoice(from), to, Utc::now());
        prop_assert_eq!(result.is_ok(), is_allowed(from, to));
    }

    #[test]
    fn prop_paid_at_only_set_by_paid(from in arb_status(), to in arb_status()) {
        let now = Utc::now();
        if let Ok(action) = InvoiceLifecycle::transition(&invoice(from), to, now) {
            if to == InvoiceStatus::Paid && from != InvoiceStatus::Paid {
                prop_assert_eq!(action.paid_at, Some(now));
            } else {
                // Everything else carries the (absent) timestamp through.
                prop_assert_eq!(action.paid_at, None);
            }
        }
    }

    #[test]
    fn prop_cancelled_accepts_nothing(to in arb_status()) {
        prop_assert!(
            InvoiceLifecycle::transition(&invoice(InvoiceStatus::Cancelled), to, Utc::now())
                .is_err()
        );
    }
}
