//! Inventory domain types.

use chrono::{DateTime, Utc};
use opsdesk_shared::types::{CategoryId, ItemId, Sku};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived stock classification. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// Quantity is zero.
    Out,
    /// Quantity is at or below the reorder level.
    Low,
    /// Quantity is above the reorder level.
    Ok,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Out => write!(f, "out"),
            Self::Low => write!(f, "low"),
            Self::Ok => write!(f, "ok"),
        }
    }
}

/// A stocked item.
///
/// Three parallel SKU fields: a free-form custom SKU, the supplier's SKU, and
/// the allocator-generated automatic SKU, which is always present and unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Self-assigned SKU, unique among items when present.
    pub sku: Option<String>,
    /// Supplier-issued SKU, unique among items when present.
    pub supplier_sku: Option<String>,
    /// Allocator-generated SKU (`INV-####`), always present and unique.
    pub auto_sku: Sku,
    /// Quantity on hand (never negative).
    pub quantity: Decimal,
    /// Unit of measure (e.g. "pcs", "m").
    pub unit: Option<String>,
    /// Optional category.
    pub category_id: Option<CategoryId>,
    /// Selling price per unit.
    pub unit_price: Decimal,
    /// Purchase cost per unit.
    pub cost_price: Option<Decimal>,
    /// Quantity at or below which the item classifies as low stock.
    pub reorder_level: Decimal,
    /// Suggested quantity to reorder.
    pub reorder_quantity: Decimal,
    /// Storage location.
    pub location: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemInput {
    /// Display name.
    pub name: String,
    /// Self-assigned SKU.
    pub sku: Option<String>,
    /// Supplier-issued SKU.
    pub supplier_sku: Option<String>,
    /// Initial quantity on hand.
    #[serde(default)]
    pub quantity: Decimal,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Optional category.
    pub category_id: Option<CategoryId>,
    /// Selling price per unit.
    #[serde(default)]
    pub unit_price: Decimal,
    /// Purchase cost per unit.
    pub cost_price: Option<Decimal>,
    /// Reorder threshold.
    #[serde(default)]
    pub reorder_level: Decimal,
    /// Suggested reorder quantity.
    #[serde(default)]
    pub reorder_quantity: Decimal,
    /// Storage location.
    pub location: Option<String>,
}

/// Partial update for an inventory item. Absent fields are left untouched.
///
/// A present field always carries a replacement value; a patch cannot clear
/// a set field back to none. Quantity is deliberately absent: it only
/// changes through adjustment operations or an explicit administrative
/// correction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemPatch {
    /// New display name.
    pub name: Option<String>,
    /// New custom SKU.
    pub sku: Option<String>,
    /// New supplier SKU.
    pub supplier_sku: Option<String>,
    /// New unit of measure.
    pub unit: Option<String>,
    /// New category.
    pub category_id: Option<CategoryId>,
    /// New selling price.
    pub unit_price: Option<Decimal>,
    /// New cost price.
    pub cost_price: Option<Decimal>,
    /// New reorder threshold.
    pub reorder_level: Option<Decimal>,
    /// New reorder quantity.
    pub reorder_quantity: Option<Decimal>,
    /// New storage location.
    pub location: Option<String>,
}
