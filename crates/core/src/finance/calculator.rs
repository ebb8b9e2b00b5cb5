//! Deterministic totals computation.

use rust_decimal::Decimal;

use super::error::FinanceError;
use super::types::{LineItem, Totals};

/// Default hourly labor rate when a document does not specify one.
pub const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Default VAT rate in percent.
pub const DEFAULT_VAT_RATE_PERCENT: Decimal = Decimal::from_parts(21, 0, 0, false, 0);

/// Stateless calculator for quote and invoice totals.
pub struct FinanceCalculator;

impl FinanceCalculator {
    /// Computes totals from line items and labor inputs.
    ///
    /// - `subtotal` = sum of `quantity * unit_price` over all line items
    /// - `labor_cost` = `labor_hours * hourly_rate` (hours default 0,
    ///   rate defaults to [`DEFAULT_HOURLY_RATE`])
    /// - `vat_amount` = `(subtotal + labor_cost) * vat_rate_percent / 100`
    /// - `total` = `subtotal + labor_cost + vat_amount`
    ///
    /// # Errors
    ///
    /// Returns [`FinanceError`] when any numeric input is negative.
    pub fn compute(
        line_items: &[LineItem],
        labor_hours: Option<Decimal>,
        hourly_rate: Option<Decimal>,
        vat_rate_percent: Decimal,
    ) -> Result<Totals, FinanceError> {
        if vat_rate_percent < Decimal::ZERO {
            return Err(FinanceError::NegativeVatRate);
        }

        let mut subtotal = Decimal::ZERO;
        for line in line_items {
            if line.quantity < Decimal::ZERO {
                return Err(FinanceError::NegativeQuantity {
                    name: line.name.clone(),
                });
            }
            if line.unit_price < Decimal::ZERO {
                return Err(FinanceError::NegativeUnitPrice {
                    name: line.name.clone(),
                });
            }
            subtotal += line.total();
        }

        let hours = labor_hours.unwrap_or(Decimal::ZERO);
        if hours < Decimal::ZERO {
            return Err(FinanceError::NegativeLaborHours);
        }
        let rate = hourly_rate.unwrap_or(DEFAULT_HOURLY_RATE);
        if rate < Decimal::ZERO {
            return Err(FinanceError::NegativeHourlyRate);
        }

        let labor_cost = hours * rate;
        let vat_amount = (subtotal + labor_cost) * vat_rate_percent / Decimal::ONE_HUNDRED;
        let total = subtotal + labor_cost + vat_amount;

        Ok(Totals {
            subtotal,
            labor_cost,
            vat_amount,
            total,
        })
    }
}
