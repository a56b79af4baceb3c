//! Inventory storage for Shelf
//!
//! This crate provides the storage abstraction for inventory items and the
//! user profile. Concrete database backends live with the host application;
//! an in-memory implementation is provided for tests and embedding.

mod error;
mod memory;
mod traits;

pub use error::*;
pub use memory::*;
pub use traits::*;
