//! Inventory management for Shelf
//!
//! [`InventoryService`] owns the item lifecycle: it keeps each stored item's
//! reminder handle in step with the notification platform and derives status
//! on every read.

mod error;
mod recipes;
mod service;

pub use error::*;
pub use recipes::*;
pub use service::*;
