//! `lending-core`: shared vocabulary for the lending library.
//!
//! This crate contains **pure domain** primitives (no IO): identifiers,
//! the item type enumeration, the injectable clock and the error taxonomy.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod item_type;
pub mod value_object;

pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use entity::Entity;
pub use error::{LendingError, LendingResult};
pub use id::{BookId, UniqueId, Username};
pub use item_type::{ItemType, ParseItemTypeError};
pub use value_object::ValueObject;
