//! Inventory repository.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use opsdesk_core::inventory::{
    InventoryError, InventoryItem, InventoryItemInput, InventoryItemPatch, StockLedger,
    StockStatus,
};
use opsdesk_core::numbering::SequenceScope;
use opsdesk_core::policy::{Actor, Operation, OwnershipPolicy};
use opsdesk_shared::types::{CategoryId, ItemId, PageRequest, PageResponse, Sku};
use opsdesk_shared::{AppError, AppResult};

use crate::memory::MemStore;

/// Filter options for listing inventory items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFilter {
    /// Case-insensitive substring match on name or any SKU field.
    pub search: Option<String>,
    /// Filter by category.
    pub category_id: Option<CategoryId>,
    /// Filter by derived stock status.
    pub stock_status: Option<StockStatus>,
}

/// Inventory repository for CRUD and stock adjustments.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    store: Arc<MemStore>,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub fn new(store: Arc<MemStore>) -> Self {
        Self { store }
    }

    /// Lists items, name ascending. Inventory is shared: members see all.
    pub fn list(
        &self,
        actor: &Actor,
        filter: &InventoryFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<InventoryItem>> {
        OwnershipPolicy::check_shared(actor, Operation::List, true).into_result("inventory")?;

        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut items: Vec<InventoryItem> = self
            .store
            .items
            .iter()
            .filter(|entry| {
                needle
                    .as_deref()
                    .is_none_or(|needle| Self::matches_search(entry, needle))
            })
            .filter(|entry| {
                filter
                    .category_id
                    .is_none_or(|id| entry.category_id == Some(id))
            })
            .filter(|entry| {
                filter
                    .stock_status
                    .is_none_or(|status| StockLedger::classify_item(entry) == status)
            })
            .map(|entry| entry.clone())
            .collect();

        items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let total = items.len() as u64;
        let data: Vec<InventoryItem> = items
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Fetches one item.
    pub fn get(&self, actor: &Actor, id: ItemId) -> AppResult<InventoryItem> {
        OwnershipPolicy::check_shared(actor, Operation::Read, true).into_result("inventory")?;
        self.store
            .items
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| AppError::NotFound(format!("inventory item {id}")))
    }

    /// Creates an item with a freshly allocated automatic SKU.
    ///
    /// Custom and supplier SKUs are checked for uniqueness under the SKU
    /// guard before the write.
    pub fn create(&self, actor: &Actor, input: InventoryItemInput) -> AppResult<InventoryItem> {
        OwnershipPolicy::check_shared(actor, Operation::Create, true).into_result("inventory")?;
        StockLedger::validate_fields(
            Some(input.quantity),
            Some(input.unit_price),
            input.cost_price,
            Some(input.reorder_level),
            Some(input.reorder_quantity),
        )
        .map_err(AppError::from)?;

        let guard = self.store.sku_guard()?;
        for sku in [input.sku.as_deref(), input.supplier_sku.as_deref()]
            .into_iter()
            .flatten()
        {
            if self.store.sku_in_use(sku, None) {
                return Err(InventoryError::DuplicateSku(sku.to_string()).into());
            }
        }

        let auto_sku = Sku::from(self.store.allocate(SequenceScope::Sku)?);
        let now = Utc::now();
        let item = InventoryItem {
            id: ItemId::new(),
            name: input.name,
            sku: input.sku,
            supplier_sku: input.supplier_sku,
            auto_sku,
            quantity: input.quantity,
            unit: input.unit,
            category_id: input.category_id,
            unit_price: input.unit_price,
            cost_price: input.cost_price,
            reorder_level: input.reorder_level,
            reorder_quantity: input.reorder_quantity,
            location: input.location,
            created_at: now,
            updated_at: now,
        };
        self.store.items.insert(item.id, item.clone());
        drop(guard);

        tracing::debug!(id = %item.id, sku = %item.auto_sku, "inventory item created");
        Ok(item)
    }

    /// Applies a partial update. Quantity is untouchable here; it only moves
    /// through [`Self::adjust_quantity`] or [`Self::set_quantity`].
    pub fn update(
        &self,
        actor: &Actor,
        id: ItemId,
        patch: InventoryItemPatch,
    ) -> AppResult<InventoryItem> {
        OwnershipPolicy::check_shared(actor, Operation::Update, true).into_result("inventory")?;
        StockLedger::validate_fields(
            None,
            patch.unit_price,
            patch.cost_price,
            patch.reorder_level,
            patch.reorder_quantity,
        )
        .map_err(AppError::from)?;

        let guard = self.store.sku_guard()?;
        for sku in [patch.sku.as_deref(), patch.supplier_sku.as_deref()]
            .into_iter()
            .flatten()
        {
            if self.store.sku_in_use(sku, Some(id)) {
                return Err(InventoryError::DuplicateSku(sku.to_string()).into());
            }
        }

        let mut entry = self
            .store
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("inventory item {id}")))?;
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(sku) = patch.sku {
            entry.sku = Some(sku);
        }
        if let Some(supplier_sku) = patch.supplier_sku {
            entry.supplier_sku = Some(supplier_sku);
        }
        if let Some(unit) = patch.unit {
            entry.unit = Some(unit);
        }
        if let Some(category_id) = patch.category_id {
            entry.category_id = Some(category_id);
        }
        if let Some(unit_price) = patch.unit_price {
            entry.unit_price = unit_price;
        }
        if let Some(cost_price) = patch.cost_price {
            entry.cost_price = Some(cost_price);
        }
        if let Some(reorder_level) = patch.reorder_level {
            entry.reorder_level = reorder_level;
        }
        if let Some(reorder_quantity) = patch.reorder_quantity {
            entry.reorder_quantity = reorder_quantity;
        }
        if let Some(location) = patch.location {
            entry.location = Some(location);
        }
        entry.updated_at = Utc::now();
        let item = entry.clone();
        drop(entry);
        drop(guard);
        Ok(item)
    }

    /// Deletes an item. Admin only.
    pub fn delete(&self, actor: &Actor, id: ItemId) -> AppResult<()> {
        OwnershipPolicy::check_shared(actor, Operation::Delete, true).into_result("inventory")?;
        self.store
            .items
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("inventory item {id}")))?;
        tracing::debug!(id = %id, "inventory item deleted");
        Ok(())
    }

    /// Applies a signed quantity adjustment.
    ///
    /// A delta that would drive the quantity below zero is rejected with
    /// `InsufficientStock`; the stored quantity stays unchanged.
    pub fn adjust_quantity(
        &self,
        actor: &Actor,
        id: ItemId,
        delta: Decimal,
    ) -> AppResult<InventoryItem> {
        OwnershipPolicy::check_shared(actor, Operation::Adjust, true).into_result("inventory")?;

        let mut entry = self
            .store
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("inventory item {id}")))?;
        entry.quantity = StockLedger::apply_adjustment(entry.quantity, delta)
            .map_err(AppError::from)?;
        entry.updated_at = Utc::now();
        tracing::debug!(id = %id, delta = %delta, quantity = %entry.quantity, "stock adjusted");
        Ok(entry.clone())
    }

    /// Directly corrects an item's quantity. Admin only.
    pub fn set_quantity(
        &self,
        actor: &Actor,
        id: ItemId,
        quantity: Decimal,
    ) -> AppResult<InventoryItem> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "direct stock correction requires admin".to_string(),
            ));
        }
        StockLedger::validate_correction(quantity).map_err(AppError::from)?;

        let mut entry = self
            .store
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("inventory item {id}")))?;
        entry.quantity = quantity;
        entry.updated_at = Utc::now();
        tracing::info!(id = %id, quantity = %quantity, "stock corrected");
        Ok(entry.clone())
    }

    /// Items at or below their reorder level, worst first then by quantity.
    pub fn low_stock(&self, actor: &Actor) -> AppResult<Vec<InventoryItem>> {
        OwnershipPolicy::check_shared(actor, Operation::List, true).into_result("inventory")?;

        let mut items: Vec<InventoryItem> = self
            .store
            .items
            .iter()
            .filter(|entry| StockLedger::classify_item(entry) != StockStatus::Ok)
            .map(|entry| entry.clone())
            .collect();
        items.sort_by(|a, b| {
            StockLedger::classify_item(a)
                .cmp(&StockLedger::classify_item(b))
                .then_with(|| a.quantity.cmp(&b.quantity))
        });
        Ok(items)
    }

    fn matches_search(item: &InventoryItem, needle: &str) -> bool {
        item.name.to_lowercase().contains(needle)
            || item.sku.as_deref().is_some_and(|sku| {
                sku.to_lowercase().contains(needle)
            })
            || item.supplier_sku.as_deref().is_some_and(|sku| {
                sku.to_lowercase().contains(needle)
            })
            || item.auto_sku.as_str().to_lowercase().contains(needle)
    }
}
