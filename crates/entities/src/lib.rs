//! Core entity definitions for Shelf.
//!
//! This crate defines the data types shared across the Shelf crates: item
//! categories and their reminder lead times, inventory items with their
//! derived status, and the user profile that owns the lead-time settings.

mod category;
mod item;
mod user;

pub use category::*;
pub use item::*;
pub use user::*;
