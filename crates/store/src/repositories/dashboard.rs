//! Dashboard repository.

use std::sync::Arc;

use chrono::Utc;

use opsdesk_core::inventory::InventoryItem;
use opsdesk_core::invoice::Invoice;
use opsdesk_core::policy::{Actor, OwnershipPolicy};
use opsdesk_core::quote::Quote;
use opsdesk_core::stats::{DashboardStats, StatsService};
use opsdesk_core::workorder::WorkOrder;
use opsdesk_shared::AppResult;

use crate::memory::MemStore;

/// Dashboard repository computing aggregate statistics.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    store: Arc<MemStore>,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub fn new(store: Arc<MemStore>) -> Self {
        Self { store }
    }

    /// Computes dashboard statistics over the actor's visible records.
    ///
    /// Members see metrics for their own documents only; inventory is shared
    /// and always counted in full.
    pub fn stats(&self, actor: &Actor) -> AppResult<DashboardStats> {
        let scope = OwnershipPolicy::list_scope(actor);
        let today = Utc::now().date_naive();

        let quotes: Vec<Quote> = self
            .store
            .quotes
            .iter()
            .filter(|q| scope.is_none_or(|owner| q.owner_id == owner))
            .map(|q| q.clone())
            .collect();
        let invoices: Vec<Invoice> = self
            .store
            .invoices
            .iter()
            .filter(|i| scope.is_none_or(|owner| i.owner_id == owner))
            .map(|i| i.clone())
            .collect();
        let work_orders: Vec<WorkOrder> = self
            .store
            .work_orders
            .iter()
            .filter(|w| scope.is_none_or(|owner| w.assignee_id == owner))
            .map(|w| w.clone())
            .collect();
        let items: Vec<InventoryItem> = self.store.items.iter().map(|i| i.clone()).collect();

        Ok(StatsService::compute(
            &quotes,
            &invoices,
            &work_orders,
            &items,
            today,
        ))
    }
}
