//! Aggregated dashboard statistics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quote pipeline statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteStats {
    /// Number of quotes, all statuses.
    pub total: u64,
    /// Quotes still in draft.
    pub draft: u64,
    /// Quotes sent and awaiting a decision.
    pub sent: u64,
    /// Approved quotes.
    pub approved: u64,
    /// Rejected quotes.
    pub rejected: u64,
    /// Quotes whose validity date passed undecided.
    pub expired: u64,
    /// Approved as a percentage of all quotes. Zero when there are none.
    pub conversion_rate: Decimal,
}

/// Invoice statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceStats {
    /// Number of invoices, all statuses.
    pub total: u64,
    /// Paid invoices.
    pub paid: u64,
    /// Unpaid invoices past their due date.
    pub overdue: u64,
    /// Sum of totals over non-paid, non-cancelled invoices.
    pub outstanding_amount: Decimal,
    /// Outstanding amount restricted to invoices past their due date.
    pub overdue_amount: Decimal,
}

/// Work order statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderStats {
    /// Number of work orders, all statuses.
    pub total: u64,
    /// Work orders in progress.
    pub in_progress: u64,
    /// Completed work orders.
    pub completed: u64,
    /// Completed as a percentage of all work orders. Zero when there are none.
    pub completion_rate: Decimal,
    /// Mean of `completed_at - created_at` in days over completed work
    /// orders. Zero when none are completed.
    pub avg_completion_days: Decimal,
}

/// Inventory statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Number of stocked items.
    pub total: u64,
    /// Items at or below their reorder level (but not out).
    pub low_stock: u64,
    /// Items with zero quantity.
    pub out_of_stock: u64,
}

/// The full dashboard payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Quote pipeline.
    pub quotes: QuoteStats,
    /// Invoicing.
    pub invoices: InvoiceStats,
    /// Work orders.
    pub work_orders: WorkOrderStats,
    /// Inventory.
    pub inventory: InventoryStats,
}
