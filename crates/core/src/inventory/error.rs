//! Inventory error types.

use opsdesk_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// An adjustment would drive quantity below zero.
    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock {
        /// Quantity currently on hand.
        available: Decimal,
        /// Quantity the adjustment tried to remove.
        requested: Decimal,
    },

    /// Quantities cannot be negative.
    #[error("Inventory quantity cannot be negative")]
    NegativeQuantity,

    /// Prices cannot be negative.
    #[error("Inventory price cannot be negative")]
    NegativePrice,

    /// Reorder levels cannot be negative.
    #[error("Reorder level cannot be negative")]
    NegativeReorderLevel,

    /// A custom or supplier SKU is already in use by another item.
    #[error("SKU '{0}' is already in use")]
    DuplicateSku(String),
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InsufficientStock {
                available,
                requested,
            } => Self::InsufficientStock {
                available,
                requested,
            },
            InventoryError::DuplicateSku(_) => Self::Conflict(err.to_string()),
            InventoryError::NegativeQuantity
            | InventoryError::NegativePrice
            | InventoryError::NegativeReorderLevel => Self::Validation(err.to_string()),
        }
    }
}
