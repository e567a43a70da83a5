//! Lending error model.

use thiserror::Error;

use crate::id::UniqueId;
use crate::item_type::ItemType;

/// Result type used across the lending layer.
pub type LendingResult<T> = Result<T, LendingError>;

/// Caller-visible lending failure.
///
/// All variants are recoverable. The rendered messages are relied upon by
/// callers and must not change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LendingError {
    /// No item with this title and type exists in the catalog.
    #[error("Could not find the {item_type}, {title}, you want to borrow")]
    NotFound { title: String, item_type: ItemType },

    /// Every copy with this title and type is currently borrowed.
    #[error("The {title} {item_type} is currently out of stock")]
    OutOfStock { title: String, item_type: ItemType },

    /// A returned item's title and type are unknown to the catalog.
    #[error("Could not the item: {title}, {item_type} with id {unique_id}")]
    UnknownItem {
        title: String,
        item_type: ItemType,
        unique_id: UniqueId,
    },

    /// A returned item's title and type are known, but no copy carries its id.
    #[error("Could not the item: {title}, {item_type} with id {unique_id}")]
    UnknownCopy {
        title: String,
        item_type: ItemType,
        unique_id: UniqueId,
    },
}

impl LendingError {
    pub fn not_found(title: impl Into<String>, item_type: ItemType) -> Self {
        Self::NotFound {
            title: title.into(),
            item_type,
        }
    }

    pub fn out_of_stock(title: impl Into<String>, item_type: ItemType) -> Self {
        Self::OutOfStock {
            title: title.into(),
            item_type,
        }
    }

    pub fn unknown_item(title: impl Into<String>, item_type: ItemType, unique_id: UniqueId) -> Self {
        Self::UnknownItem {
            title: title.into(),
            item_type,
            unique_id,
        }
    }

    pub fn unknown_copy(title: impl Into<String>, item_type: ItemType, unique_id: UniqueId) -> Self {
        Self::UnknownCopy {
            title: title.into(),
            item_type,
            unique_id,
        }
    }

    /// True for every "item not found" condition (borrow or return).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::UnknownItem { .. } | Self::UnknownCopy { .. }
        )
    }

    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, Self::OutOfStock { .. })
    }
}
