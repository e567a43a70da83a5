//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Catalog items, users and receipts are value objects: immutable, compared by
/// all of their fields, and freely cloned across threads.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: `Item { unique_id: "1", title: "Pi", .. }` equals any other
///   item with the same fields.
/// - **Entity**: a physical copy keeps its identity while its borrow state changes.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
