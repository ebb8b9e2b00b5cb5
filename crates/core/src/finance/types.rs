//! Financial domain types embedded in quotes and invoices.

use opsdesk_shared::types::ItemId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A single priced line on a quote or invoice.
///
/// Line items are owned exclusively by their parent document and are
/// destroyed with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Optional reference to the inventory item this line was priced from.
    pub item_id: Option<ItemId>,
    /// Display name of the line.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Quantity (must be >= 0).
    pub quantity: Decimal,
    /// Price per unit (must be >= 0).
    pub unit_price: Decimal,
}

impl LineItem {
    /// The line total: quantity times unit price.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Computed totals for a quote or invoice.
///
/// Internal amounts carry full decimal precision; rounding happens only at
/// presentation via [`Totals::rounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line item totals.
    pub subtotal: Decimal,
    /// Labor hours times hourly rate.
    pub labor_cost: Decimal,
    /// VAT over (subtotal + labor cost).
    pub vat_amount: Decimal,
    /// Grand total: subtotal + labor cost + VAT.
    pub total: Decimal,
}

impl Totals {
    /// A zeroed set of totals.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            labor_cost: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Presentation copy rounded to 2 decimal places (banker's rounding).
    #[must_use]
    pub fn rounded(&self) -> Self {
        let round = |d: Decimal| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        Self {
            subtotal: round(self.subtotal),
            labor_cost: round(self.labor_cost),
            vat_amount: round(self.vat_amount),
            total: round(self.total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_item_total() {
        let line = LineItem {
            item_id: None,
            name: "Filter".to_string(),
            description: None,
            quantity: dec!(3),
            unit_price: dec!(12.50),
        };
        assert_eq!(line.total(), dec!(37.50));
    }

    #[test]
    fn test_totals_zero() {
        let totals = Totals::zero();
        assert_eq!(totals.total, Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::ZERO);
    }

    #[test]
    fn test_totals_rounded_bankers() {
        let totals = Totals {
            subtotal: dec!(10.005),
            labor_cost: dec!(10.015),
            vat_amount: dec!(4.2042),
            total: dec!(24.2242),
        };
        let rounded = totals.rounded();
        // Midpoint rounds to even.
        assert_eq!(rounded.subtotal, dec!(10.00));
        assert_eq!(rounded.labor_cost, dec!(10.02));
        assert_eq!(rounded.vat_amount, dec!(4.20));
        assert_eq!(rounded.total, dec!(24.22));
    }
}
