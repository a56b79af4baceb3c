//! Expiration status derivation for Shelf
//!
//! Status is never stored as a source of truth. It is derived on demand from
//! an item's expiration date, its category, the user's lead times and the
//! current calendar day. Everything here is day-granular and infallible:
//! dates that cannot be parsed fall back to `Fresh`.

mod clock;
mod date;
mod status;

pub use clock::*;
pub use date::*;
pub use status::*;
