//! Inventory service errors.

use inventory_store::InventoryStoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned by [`crate::InventoryService`].
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid item: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] InventoryStoreError),
}

/// Result type for inventory service operations.
pub type InventoryResult<T> = Result<T, InventoryError>;
