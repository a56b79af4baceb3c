//! Inventory store error types.

use thiserror::Error;

/// Errors that can occur during inventory store operations.
#[derive(Debug, Error)]
pub enum InventoryStoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Duplicate entity.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },

    /// Backend failure.
    #[error("{0}")]
    Other(String),
}

impl InventoryStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an already exists error.
    pub fn already_exists(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.into(),
        }
    }
}

/// Result type for inventory store operations.
pub type InventoryStoreResult<T> = Result<T, InventoryStoreError>;
