//! Integration tests for the quote repository.
//!
//! Covers numbering, totals, visibility, lifecycle, and conversions.

mod common;

use std::sync::Arc;

use common::{line, setup};
use opsdesk_core::customer::CustomerInput;
use opsdesk_core::policy::Actor;
use opsdesk_core::quote::{QuoteInput, QuotePatch, QuoteStatus};
use opsdesk_shared::AppError;
use opsdesk_shared::config::BusinessConfig;
use opsdesk_shared::types::{PageRequest, QuoteNumber, UserId};
use opsdesk_store::{CustomerRepository, MemStore, QuoteRepository};
use rust_decimal_macros::dec;

fn quote_input(ctx: &common::TestContext) -> QuoteInput {
    QuoteInput {
        customer_id: ctx.customer_id,
        title: "Boiler replacement".to_string(),
        line_items: vec![line("Boiler", dec!(1), dec!(1200))],
        labor_hours: None,
        hourly_rate: None,
        valid_until: None,
        notes: None,
    }
}

#[test]
fn test_create_assigns_sequential_numbers() {
    let ctx = setup();
    let first = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    let second = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    assert_eq!(first.number.as_str(), "Q0001");
    assert_eq!(second.number.as_str(), "Q0002");
    assert_eq!(first.status, QuoteStatus::Draft);
}

#[test]
fn test_deleted_number_is_never_reissued() {
    let ctx = setup();
    let first = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    ctx.quotes.delete(&ctx.admin, &first.number).unwrap();
    let next = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    assert_eq!(next.number.as_str(), "Q0002");
}

#[test]
fn test_create_computes_totals_with_labor_and_vat() {
    let ctx = setup();
    let quote = ctx
        .quotes
        .create(
            &ctx.admin,
            QuoteInput {
                customer_id: ctx.customer_id,
                title: "Service call".to_string(),
                line_items: vec![line("Filter", dec!(2), dec!(50))],
                labor_hours: Some(dec!(3)),
                hourly_rate: None,
                valid_until: None,
                notes: None,
            },
        )
        .unwrap();
    assert_eq!(quote.totals.subtotal, dec!(100));
    assert_eq!(quote.totals.labor_cost, dec!(150));
    assert_eq!(quote.totals.vat_amount, dec!(52.50));
    assert_eq!(quote.totals.total, dec!(302.50));
}

#[test]
fn test_create_rejects_unknown_customer() {
    let ctx = setup();
    let mut input = quote_input(&ctx);
    input.customer_id = opsdesk_shared::types::CustomerId::new();
    let err = ctx.quotes.create(&ctx.admin, input).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_update_recomputes_totals_only_on_financial_change() {
    let ctx = setup();
    let quote = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    let original_totals = quote.totals;

    // A notes-only patch must not perturb stored totals.
    let updated = ctx
        .quotes
        .update(
            &ctx.admin,
            &quote.number,
            QuotePatch {
                notes: Some("ring the back doorbell".to_string()),
                ..QuotePatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.totals, original_totals);

    let updated = ctx
        .quotes
        .update(
            &ctx.admin,
            &quote.number,
            QuotePatch {
                labor_hours: Some(dec!(2)),
                ..QuotePatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.totals.labor_cost, dec!(100));
    assert_ne!(updated.totals, original_totals);
}

#[test]
fn test_member_cannot_see_foreign_quote() {
    let ctx = setup();
    let quote = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();

    // Existence must not leak: NotFound, not Forbidden.
    let err = ctx.quotes.get(&ctx.member, &quote.number).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = ctx
        .quotes
        .transition(&ctx.member, &quote.number, QuoteStatus::Sent)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_member_list_scoped_to_own_quotes() {
    let ctx = setup();
    ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    let own = ctx.quotes.create(&ctx.member, quote_input(&ctx)).unwrap();

    let page = ctx
        .quotes
        .list(&ctx.member, &Default::default(), &PageRequest::default())
        .unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].number, own.number);

    let page = ctx
        .quotes
        .list(&ctx.admin, &Default::default(), &PageRequest::default())
        .unwrap();
    assert_eq!(page.meta.total, 2);
}

#[test]
fn test_member_cannot_delete_own_quote() {
    let ctx = setup();
    let quote = ctx.quotes.create(&ctx.member, quote_input(&ctx)).unwrap();
    let err = ctx.quotes.delete(&ctx.member, &quote.number).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test]
fn test_lifecycle_and_terminal_update_rejection() {
    let ctx = setup();
    let quote = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();

    ctx.quotes
        .transition(&ctx.admin, &quote.number, QuoteStatus::Sent)
        .unwrap();
    let approved = ctx
        .quotes
        .transition(&ctx.admin, &quote.number, QuoteStatus::Approved)
        .unwrap();
    assert_eq!(approved.status, QuoteStatus::Approved);

    // Terminal quotes reject content updates.
    let err = ctx
        .quotes
        .update(
            &ctx.admin,
            &quote.number,
            QuotePatch {
                title: Some("New title".to_string()),
                ..QuotePatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, AppError::PreconditionFailed(_)));

    // And further transitions.
    let err = ctx
        .quotes
        .transition(&ctx.admin, &quote.number, QuoteStatus::Sent)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[test]
fn test_skipping_sent_is_invalid() {
    let ctx = setup();
    let quote = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    let err = ctx
        .quotes
        .transition(&ctx.admin, &quote.number, QuoteStatus::Approved)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[test]
fn test_conversion_requires_approval() {
    let ctx = setup();
    let quote = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    let err = ctx
        .quotes
        .convert_to_invoice(&ctx.admin, &quote.number, None)
        .unwrap_err();
    assert!(matches!(err, AppError::PreconditionFailed(_)));
}

#[test]
fn test_conversion_writes_cross_links_once() {
    let ctx = setup();
    let quote = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    ctx.quotes
        .transition(&ctx.admin, &quote.number, QuoteStatus::Sent)
        .unwrap();
    ctx.quotes
        .transition(&ctx.admin, &quote.number, QuoteStatus::Approved)
        .unwrap();

    let assignee = UserId::new();
    let work_order = ctx
        .quotes
        .convert_to_work_order(&ctx.admin, &quote.number, assignee)
        .unwrap();
    assert_eq!(work_order.number.as_str(), "WO0001");
    assert_eq!(work_order.assignee_id, assignee);

    let invoice = ctx
        .quotes
        .convert_to_invoice(&ctx.admin, &quote.number, None)
        .unwrap();
    assert_eq!(invoice.quote.as_ref(), Some(&quote.number));
    assert_eq!(invoice.totals, quote.totals);
    assert_eq!(invoice.work_order.as_ref(), Some(&work_order.number));

    let reread = ctx.quotes.get(&ctx.admin, &quote.number).unwrap();
    assert_eq!(reread.work_order, Some(work_order.number));
    assert_eq!(reread.invoice, Some(invoice.number));

    // A second conversion of either kind conflicts.
    let err = ctx
        .quotes
        .convert_to_invoice(&ctx.admin, &quote.number, None)
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    let err = ctx
        .quotes
        .convert_to_work_order(&ctx.admin, &quote.number, assignee)
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[test]
fn test_delete_blocked_while_linked_to_invoice() {
    let ctx = setup();
    let quote = ctx.quotes.create(&ctx.admin, quote_input(&ctx)).unwrap();
    ctx.quotes
        .transition(&ctx.admin, &quote.number, QuoteStatus::Sent)
        .unwrap();
    ctx.quotes
        .transition(&ctx.admin, &quote.number, QuoteStatus::Approved)
        .unwrap();
    let invoice = ctx
        .quotes
        .convert_to_invoice(&ctx.admin, &quote.number, None)
        .unwrap();

    let err = ctx.quotes.delete(&ctx.admin, &quote.number).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Deleting the invoice clears the link and unblocks deletion.
    ctx.invoices.delete(&ctx.admin, &invoice.number).unwrap();
    ctx.quotes.delete(&ctx.admin, &quote.number).unwrap();
}

#[test]
fn test_configured_retry_bound_limits_allocation() {
    let store = Arc::new(MemStore::with_attempts(1));
    let customers = CustomerRepository::new(Arc::clone(&store));
    let quotes = QuoteRepository::new(Arc::clone(&store), BusinessConfig::default());
    let admin = Actor::admin(UserId::new());
    let customer = customers
        .create(
            &admin,
            CustomerInput {
                name: "Jansen Heating BV".to_string(),
                ..CustomerInput::default()
            },
        )
        .unwrap();
    let input = || QuoteInput {
        customer_id: customer.id,
        title: "Boiler replacement".to_string(),
        line_items: vec![],
        labor_hours: None,
        hourly_rate: None,
        valid_until: None,
        notes: None,
    };

    let first = quotes.create(&admin, input()).unwrap();
    assert_eq!(first.number.as_str(), "Q0001");

    // Imported data already carries the next candidate number; a single
    // attempt cannot retry past the collision.
    let mut imported = first.clone();
    imported.number = QuoteNumber::from("Q0002");
    store.quotes.insert(imported.number.clone(), imported);

    let err = quotes.create(&admin, input()).unwrap_err();
    assert!(matches!(err, AppError::AllocationExhausted(_)));
}
