//! (title, type) → copies index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lending_core::ItemType;

use crate::copy::StockCopy;

/// Bucket key: copies sharing a title and type are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogKey {
    pub title: String,
    pub item_type: ItemType,
}

impl CatalogKey {
    pub fn new(title: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            title: title.into(),
            item_type,
        }
    }
}

#[derive(Debug)]
struct Bucket {
    key: CatalogKey,
    copies: Vec<StockCopy>,
}

/// Immutable grouping of copies by [`CatalogKey`].
///
/// Bucket membership is fixed at construction; only each copy's internal state
/// changes afterwards. Lookups therefore need no synchronization.
///
/// Iteration order is stable: buckets in order of first appearance in the
/// input, copies in input order within a bucket.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    buckets: Vec<Bucket>,
    positions: HashMap<CatalogKey, usize>,
    len: usize,
}

impl CatalogIndex {
    pub fn build(copies: impl IntoIterator<Item = StockCopy>) -> Self {
        let mut index = Self::default();

        for copy in copies {
            let key = copy.item().key();
            let slot = match index.positions.get(&key) {
                Some(&slot) => slot,
                None => {
                    let slot = index.buckets.len();
                    index.positions.insert(key.clone(), slot);
                    index.buckets.push(Bucket {
                        key,
                        copies: Vec::new(),
                    });
                    slot
                }
            };
            index.buckets[slot].copies.push(copy);
            index.len += 1;
        }

        index
    }

    /// Copies with this title and type, or an empty slice.
    pub fn lookup(&self, title: &str, item_type: ItemType) -> &[StockCopy] {
        self.bucket(&CatalogKey::new(title, item_type))
            .map(|bucket| bucket.copies.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, title: &str, item_type: ItemType) -> bool {
        self.bucket(&CatalogKey::new(title, item_type)).is_some()
    }

    fn bucket(&self, key: &CatalogKey) -> Option<&Bucket> {
        self.positions.get(key).map(|&slot| &self.buckets[slot])
    }

    /// Every copy, in stable order.
    pub fn copies(&self) -> impl Iterator<Item = &StockCopy> + '_ {
        self.buckets.iter().flat_map(|bucket| bucket.copies.iter())
    }

    /// Bucket keys in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &CatalogKey> + '_ {
        self.buckets.iter().map(|bucket| &bucket.key)
    }

    /// Total number of copies.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
