//! Expiry reminder scheduling for Shelf
//!
//! This crate turns the derived expiration status of an item into exactly one
//! outstanding local notification. The device scheduler is abstracted behind
//! [`NotificationPlatform`]; an in-memory platform and a tokio timer platform
//! are provided.

mod config;
mod error;
mod messages;
mod platform;
mod scheduler;
mod timer;

pub use config::*;
pub use error::*;
pub use messages::*;
pub use platform::*;
pub use scheduler::*;
pub use timer::*;
