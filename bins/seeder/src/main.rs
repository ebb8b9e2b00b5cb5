//! Demo data seeder for Opsdesk development.
//!
//! Walks one realistic workflow through every repository: customers and
//! stock, a quote from draft to approval, conversion into a work order and
//! invoice, payment, queue reordering, and finally the dashboard metrics.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use tracing::info;

use opsdesk_core::customer::CustomerInput;
use opsdesk_core::finance::LineItem;
use opsdesk_core::inventory::InventoryItemInput;
use opsdesk_core::invoice::{InvoiceInput, InvoiceStatus};
use opsdesk_core::policy::Actor;
use opsdesk_core::quote::{QuoteInput, QuoteStatus};
use opsdesk_core::workorder::{WorkOrderPatch, WorkOrderStatus};
use opsdesk_shared::AppConfig;
use opsdesk_shared::types::{PageRequest, UserId};
use opsdesk_store::repositories::QuoteFilter;
use opsdesk_store::{
    CustomerRepository, DashboardRepository, InventoryRepository, InvoiceRepository, MemStore,
    QuoteRepository, WorkOrderRepository,
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let store = Arc::new(MemStore::with_attempts(config.business.allocation_attempts));

    let customers = CustomerRepository::new(Arc::clone(&store));
    let quotes = QuoteRepository::new(Arc::clone(&store), config.business.clone());
    let invoices = InvoiceRepository::new(Arc::clone(&store), config.business.clone());
    let work_orders = WorkOrderRepository::new(Arc::clone(&store));
    let inventory = InventoryRepository::new(Arc::clone(&store));
    let dashboard = DashboardRepository::new(Arc::clone(&store));

    let admin = Actor::admin(UserId::new());
    let technician = Actor::member(UserId::new());
    let today = Utc::now().date_naive();

    info!("Seeding customers");
    let jansen = customers.create(
        &admin,
        CustomerInput {
            name: "Jansen Heating BV".to_string(),
            email: Some("info@jansen.example".to_string()),
            phone: Some("+31 20 123 4567".to_string()),
            ..CustomerInput::default()
        },
    )?;
    let devries = customers.create(
        &admin,
        CustomerInput {
            name: "De Vries Vastgoed".to_string(),
            email: Some("beheer@devries.example".to_string()),
            ..CustomerInput::default()
        },
    )?;

    info!("Seeding inventory");
    let valve = inventory.create(
        &admin,
        InventoryItemInput {
            name: "Radiator valve DN15".to_string(),
            sku: Some("RV-15".to_string()),
            supplier_sku: None,
            quantity: dec!(24),
            unit: Some("pcs".to_string()),
            category_id: None,
            unit_price: dec!(12.50),
            cost_price: Some(dec!(7.10)),
            reorder_level: dec!(10),
            reorder_quantity: dec!(50),
            location: Some("A-03".to_string()),
        },
    )?;
    inventory.create(
        &admin,
        InventoryItemInput {
            name: "Copper pipe 15mm (2m)".to_string(),
            sku: None,
            supplier_sku: Some("CU-15-2000".to_string()),
            quantity: dec!(4),
            unit: Some("pcs".to_string()),
            category_id: None,
            unit_price: dec!(9.95),
            cost_price: Some(dec!(5.20)),
            reorder_level: dec!(8),
            reorder_quantity: dec!(40),
            location: Some("B-11".to_string()),
        },
    )?;

    info!("Seeding the quote-to-invoice workflow");
    let quote = quotes.create(
        &admin,
        QuoteInput {
            customer_id: jansen.id,
            title: "Radiator replacement, 2nd floor".to_string(),
            line_items: vec![LineItem {
                item_id: Some(valve.id),
                name: valve.name.clone(),
                description: None,
                quantity: dec!(2),
                unit_price: dec!(12.50),
            }],
            labor_hours: Some(dec!(3)),
            hourly_rate: None,
            valid_until: Some(today + Duration::days(30)),
            notes: Some("Access via the rear staircase".to_string()),
        },
    )?;
    quotes.transition(&admin, &quote.number, QuoteStatus::Sent)?;
    quotes.transition(&admin, &quote.number, QuoteStatus::Approved)?;
    info!(number = %quote.number, total = %quote.totals.total, "quote approved");

    let work_order = quotes.convert_to_work_order(&admin, &quote.number, technician.id)?;
    let invoice = quotes.convert_to_invoice(&admin, &quote.number, Some(today + Duration::days(14)))?;
    info!(work_order = %work_order.number, invoice = %invoice.number, "quote converted");

    info!("Completing the work order");
    work_orders.transition(&technician, &work_order.number, WorkOrderStatus::InProgress)?;
    inventory.adjust_quantity(&technician, valve.id, dec!(-2))?;
    work_orders.update(
        &technician,
        &work_order.number,
        WorkOrderPatch {
            actual_hours: Some(dec!(3.5)),
            ..WorkOrderPatch::default()
        },
    )?;
    work_orders.transition(&technician, &work_order.number, WorkOrderStatus::Completed)?;
    invoices.transition(&admin, &invoice.number, InvoiceStatus::Paid)?;

    info!("Seeding an overdue invoice");
    let overdue = invoices.create(
        &admin,
        InvoiceInput {
            customer_id: devries.id,
            line_items: vec![LineItem {
                item_id: None,
                name: "Annual boiler service".to_string(),
                description: None,
                quantity: dec!(1),
                unit_price: dec!(180),
            }],
            labor_hours: None,
            hourly_rate: None,
            due_date: Some(today - Duration::days(7)),
            notes: None,
        },
    )?;
    invoices.transition(&admin, &overdue.number, InvoiceStatus::Sent)?;

    let stats = dashboard.stats(&admin)?;
    info!(
        quotes = stats.quotes.total,
        conversion_rate = %stats.quotes.conversion_rate,
        "quote pipeline"
    );
    info!(
        outstanding = %stats.invoices.outstanding_amount,
        overdue = %stats.invoices.overdue_amount,
        "invoicing"
    );
    info!(
        completion_rate = %stats.work_orders.completion_rate,
        avg_completion_days = %stats.work_orders.avg_completion_days,
        "work orders"
    );
    info!(
        low_stock = stats.inventory.low_stock,
        out_of_stock = stats.inventory.out_of_stock,
        "inventory"
    );

    let recent = quotes.list(
        &admin,
        &QuoteFilter::default(),
        &PageRequest::new(1, config.pagination.per_page),
    )?;
    info!(
        shown = recent.data.len(),
        total = recent.meta.total,
        "quote listing"
    );

    info!("Seeding complete");
    Ok(())
}
