//! Shared fixtures for store integration tests.

// Not every test file uses every fixture.
#![allow(dead_code)]

use std::sync::Arc;

use opsdesk_core::customer::CustomerInput;
use opsdesk_core::finance::LineItem;
use opsdesk_core::policy::Actor;
use opsdesk_shared::config::BusinessConfig;
use opsdesk_shared::types::{CustomerId, UserId};
use opsdesk_store::{
    CustomerRepository, DashboardRepository, InventoryRepository, InvoiceRepository, MemStore,
    QuoteRepository, WorkOrderRepository,
};
use rust_decimal::Decimal;

/// Everything a test needs: one store, all repositories, two actors, and a
/// seeded customer.
pub struct TestContext {
    pub store: Arc<MemStore>,
    pub customers: CustomerRepository,
    pub quotes: QuoteRepository,
    pub invoices: InvoiceRepository,
    pub work_orders: WorkOrderRepository,
    pub inventory: InventoryRepository,
    pub dashboard: DashboardRepository,
    pub admin: Actor,
    pub member: Actor,
    pub customer_id: CustomerId,
}

pub fn setup() -> TestContext {
    let store = Arc::new(MemStore::new());
    let business = BusinessConfig::default();

    let customers = CustomerRepository::new(Arc::clone(&store));
    let quotes = QuoteRepository::new(Arc::clone(&store), business.clone());
    let invoices = InvoiceRepository::new(Arc::clone(&store), business.clone());
    let work_orders = WorkOrderRepository::new(Arc::clone(&store));
    let inventory = InventoryRepository::new(Arc::clone(&store));
    let dashboard = DashboardRepository::new(Arc::clone(&store));

    let admin = Actor::admin(UserId::new());
    let member = Actor::member(UserId::new());

    let customer = customers
        .create(
            &admin,
            CustomerInput {
                name: "Jansen Heating BV".to_string(),
                email: Some("info@jansen.example".to_string()),
                ..CustomerInput::default()
            },
        )
        .expect("Failed to create test customer");

    TestContext {
        store,
        customers,
        quotes,
        invoices,
        work_orders,
        inventory,
        dashboard,
        admin,
        member,
        customer_id: customer.id,
    }
}

/// A plain priced line without an inventory reference.
pub fn line(name: &str, quantity: Decimal, unit_price: Decimal) -> LineItem {
    LineItem {
        item_id: None,
        name: name.to_string(),
        description: None,
        quantity,
        unit_price,
    }
}
