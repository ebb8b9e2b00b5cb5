//! Dashboard statistics reductions.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::inventory::{InventoryItem, StockLedger, StockStatus};
use crate::invoice::{Invoice, InvoiceLifecycle, InvoiceStatus};
use crate::quote::{Quote, QuoteLifecycle, QuoteStatus};
use crate::workorder::{WorkOrder, WorkOrderStatus};

use super::types::{DashboardStats, InventoryStats, InvoiceStats, QuoteStats, WorkOrderStats};

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
const SECONDS_PER_DAY: Decimal = Decimal::from_parts(86_400, 0, 0, false, 0);

/// Service computing dashboard statistics.
pub struct StatsService;

impl StatsService {
    /// Computes the full dashboard payload from current collections.
    ///
    /// Derived statuses (expired quotes, overdue invoices) are evaluated
    /// against `today`, matching what list and read operations would show.
    #[must_use]
    pub fn compute(
        quotes: &[Quote],
        invoices: &[Invoice],
        work_orders: &[WorkOrder],
        items: &[InventoryItem],
        today: NaiveDate,
    ) -> DashboardStats {
        DashboardStats {
            quotes: Self::quote_stats(quotes, today),
            invoices: Self::invoice_stats(invoices, today),
            work_orders: Self::work_order_stats(work_orders),
            inventory: Self::inventory_stats(items),
        }
    }

    /// Quote pipeline counts and conversion rate.
    #[must_use]
    pub fn quote_stats(quotes: &[Quote], today: NaiveDate) -> QuoteStats {
        let mut stats = QuoteStats::default();
        for quote in quotes {
            stats.total += 1;
            match QuoteLifecycle::display_status(quote, today) {
                QuoteStatus::Draft => stats.draft += 1,
                QuoteStatus::Sent => stats.sent += 1,
                QuoteStatus::Approved => stats.approved += 1,
                QuoteStatus::Rejected => stats.rejected += 1,
                QuoteStatus::Expired => stats.expired += 1,
            }
        }
        stats.conversion_rate = Self::percentage(stats.approved, stats.total);
        stats
    }

    /// Invoice counts and outstanding amounts.
    #[must_use]
    pub fn invoice_stats(invoices: &[Invoice], today: NaiveDate) -> InvoiceStats {
        let mut stats = InvoiceStats::default();
        for invoice in invoices {
            stats.total += 1;
            if invoice.status == InvoiceStatus::Paid {
                stats.paid += 1;
            }
            if invoice.status.is_outstanding() {
                stats.outstanding_amount += invoice.totals.total;
                if InvoiceLifecycle::is_overdue(invoice, today) {
                    stats.overdue += 1;
                    stats.overdue_amount += invoice.totals.total;
                }
            }
        }
        stats
    }

    /// Work order counts, completion rate, and average cycle time.
    #[must_use]
    pub fn work_order_stats(work_orders: &[WorkOrder]) -> WorkOrderStats {
        let mut stats = WorkOrderStats::default();
        let mut completion_seconds = Decimal::ZERO;
        let mut timed_completions: u64 = 0;
        for wo in work_orders {
            stats.total += 1;
            match wo.status {
                WorkOrderStatus::InProgress => stats.in_progress += 1,
                WorkOrderStatus::Completed => {
                    stats.completed += 1;
                    if let Some(completed_at) = wo.completed_at {
                        let elapsed = completed_at.signed_duration_since(wo.created_at);
                        completion_seconds += Decimal::from(elapsed.num_seconds().max(0));
                        timed_completions += 1;
                    }
                }
                WorkOrderStatus::Todo | WorkOrderStatus::Pending => {}
            }
        }
        stats.completion_rate = Self::percentage(stats.completed, stats.total);
        if timed_completions > 0 {
            stats.avg_completion_days =
                completion_seconds / SECONDS_PER_DAY / Decimal::from(timed_completions);
        }
        stats
    }

    /// Inventory counts by stock classification.
    #[must_use]
    pub fn inventory_stats(items: &[InventoryItem]) -> InventoryStats {
        let mut stats = InventoryStats::default();
        for item in items {
            stats.total += 1;
            match StockLedger::classify_item(item) {
                StockStatus::Out => stats.out_of_stock += 1,
                StockStatus::Low => stats.low_stock += 1,
                StockStatus::Ok => {}
            }
        }
        stats
    }

    fn percentage(part: u64, whole: u64) -> Decimal {
        if whole == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(part) * HUNDRED / Decimal::from(whole)
    }
}
