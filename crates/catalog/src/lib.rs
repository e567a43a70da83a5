//! Lending catalog: physical copies, the (title, type) index and the
//! borrow/return protocol.
//!
//! Everything here is in-memory and synchronous. Concurrency control is
//! per copy; see [`Library`].

pub mod config;
pub mod copy;
pub mod index;
pub mod item;
pub mod library;
pub mod seed;

pub use config::{ConfigError, LibraryConfig};
pub use copy::{CopyState, StockCopy};
pub use index::{CatalogIndex, CatalogKey};
pub use item::{Item, Receipt, User};
pub use library::Library;
pub use seed::{SeedError, items_from_json, load_items};
