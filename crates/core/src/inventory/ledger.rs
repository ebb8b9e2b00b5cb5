//! Stock classification and adjustment rules.

use rust_decimal::Decimal;

use super::error::InventoryError;
use super::types::{InventoryItem, StockStatus};

/// Stateless service implementing the stock ledger rules.
pub struct StockLedger;

impl StockLedger {
    /// Classifies a quantity against a reorder level.
    ///
    /// `Out` iff quantity is zero; `Low` iff `0 < quantity <= reorder_level`;
    /// `Ok` otherwise.
    #[must_use]
    pub fn classify(quantity: Decimal, reorder_level: Decimal) -> StockStatus {
        if quantity <= Decimal::ZERO {
            StockStatus::Out
        } else if quantity <= reorder_level {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    /// Classifies an item.
    #[must_use]
    pub fn classify_item(item: &InventoryItem) -> StockStatus {
        Self::classify(item.quantity, item.reorder_level)
    }

    /// Applies a signed quantity adjustment.
    ///
    /// An adjustment that would drive the quantity below zero is rejected,
    /// not clamped; the caller's stored quantity stays untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InsufficientStock`] when `delta` removes
    /// more than is on hand.
    pub fn apply_adjustment(quantity: Decimal, delta: Decimal) -> Result<Decimal, InventoryError> {
        let new_quantity = quantity + delta;
        if new_quantity < Decimal::ZERO {
            return Err(InventoryError::InsufficientStock {
                available: quantity,
                requested: -delta,
            });
        }
        Ok(new_quantity)
    }

    /// Validates an administrative direct quantity correction.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NegativeQuantity`] for negative targets.
    pub fn validate_correction(quantity: Decimal) -> Result<(), InventoryError> {
        if quantity < Decimal::ZERO {
            return Err(InventoryError::NegativeQuantity);
        }
        Ok(())
    }

    /// Validates the numeric fields of an item input or patch.
    ///
    /// # Errors
    ///
    /// Returns the matching [`InventoryError`] for any negative value.
    pub fn validate_fields(
        quantity: Option<Decimal>,
        unit_price: Option<Decimal>,
        cost_price: Option<Decimal>,
        reorder_level: Option<Decimal>,
        reorder_quantity: Option<Decimal>,
    ) -> Result<(), InventoryError> {
        if quantity.is_some_and(|q| q < Decimal::ZERO) {
            return Err(InventoryError::NegativeQuantity);
        }
        for price in [unit_price, cost_price].into_iter().flatten() {
            if price < Decimal::ZERO {
                return Err(InventoryError::NegativePrice);
            }
        }
        if reorder_level.is_some_and(|r| r < Decimal::ZERO)
            || reorder_quantity.is_some_and(|r| r < Decimal::ZERO)
        {
            return Err(InventoryError::NegativeReorderLevel);
        }
        Ok(())
    }
}
