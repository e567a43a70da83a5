use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lending_core::{BookId, ItemType, UniqueId, Username, ValueObject};

use crate::index::CatalogKey;

/// Catalog item: one physical copy's immutable description.
///
/// Two items with the same title and type are interchangeable for borrowing,
/// whatever their `unique_id` or `book_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub unique_id: UniqueId,
    pub book_id: BookId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
}

impl Item {
    pub fn new(
        unique_id: impl Into<UniqueId>,
        book_id: impl Into<BookId>,
        item_type: ItemType,
        title: impl Into<String>,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            book_id: book_id.into(),
            item_type,
            title: title.into(),
        }
    }

    pub fn book(
        unique_id: impl Into<UniqueId>,
        book_id: impl Into<BookId>,
        title: impl Into<String>,
    ) -> Self {
        Self::new(unique_id, book_id, ItemType::Book, title)
    }

    pub fn dvd(
        unique_id: impl Into<UniqueId>,
        book_id: impl Into<BookId>,
        title: impl Into<String>,
    ) -> Self {
        Self::new(unique_id, book_id, ItemType::DVD, title)
    }

    pub fn vhs(
        unique_id: impl Into<UniqueId>,
        book_id: impl Into<BookId>,
        title: impl Into<String>,
    ) -> Self {
        Self::new(unique_id, book_id, ItemType::VHS, title)
    }

    /// The (title, type) bucket this item belongs to.
    pub fn key(&self) -> CatalogKey {
        CatalogKey::new(self.title.clone(), self.item_type)
    }
}

impl ValueObject for Item {}

/// Library user. Identity is the username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub username: Username,
}

impl User {
    pub fn new(username: impl Into<Username>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl core::fmt::Display for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.username, f)
    }
}

impl ValueObject for User {}

/// Proof of a successful borrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Calendar date (UTC) on which the item was borrowed.
    pub return_date: NaiveDate,
    pub item: Item,
}

impl ValueObject for Receipt {}
