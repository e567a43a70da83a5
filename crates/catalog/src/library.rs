//! Borrow/return orchestration over the catalog index.

use tracing::{debug, info, warn};

use lending_core::{Clock, Entity, ItemType, LendingError, LendingResult};

use crate::config::LibraryConfig;
use crate::copy::StockCopy;
use crate::index::CatalogIndex;
use crate::item::{Item, Receipt, User};

/// Lending library façade.
///
/// Owns the catalog index and every copy. All operations take `&self`; share a
/// library between threads with `Arc` or scoped borrows. There is no
/// catalog-wide lock: borrow and return synchronize on the single copy they
/// touch.
///
/// Query operations snapshot each copy independently, so under concurrent
/// borrowing a scan may see some copies before and others after a change.
#[derive(Debug)]
pub struct Library<C> {
    clock: C,
    index: CatalogIndex,
    config: LibraryConfig,
}

impl<C: Clock> Library<C> {
    pub fn new(clock: C, items: impl IntoIterator<Item = Item>) -> Self {
        Self::with_config(clock, items, LibraryConfig::default())
    }

    pub fn with_config(
        clock: C,
        items: impl IntoIterator<Item = Item>,
        config: LibraryConfig,
    ) -> Self {
        let index = CatalogIndex::build(items.into_iter().map(StockCopy::new));

        info!(
            copies = index.len(),
            titles = index.bucket_count(),
            overdue_after_days = config.overdue_after_days,
            "library catalog built"
        );

        Self {
            clock,
            index,
            config,
        }
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Borrow any available copy of `title`/`item_type` for `user`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the catalog has no such title and type.
    /// - `OutOfStock` if no copy could be claimed.
    pub fn borrow(&self, title: &str, item_type: ItemType, user: &User) -> LendingResult<Receipt> {
        if !self.index.contains(title, item_type) {
            debug!(title, %item_type, "borrow of unknown item");
            return Err(LendingError::not_found(title, item_type));
        }

        let copies = self.index.lookup(title, item_type);

        // A copy seen as available may be claimed by another caller before we
        // get to it; rescan and try the next one. At most one attempt per copy.
        for attempt in 0..copies.len() {
            let Some(copy) = copies.iter().find(|copy| copy.is_available()) else {
                break;
            };

            let now = self.clock.now();
            match copy.try_borrow(user, now) {
                Ok(()) => {
                    debug!(
                        title,
                        %item_type,
                        unique_id = %copy.item().unique_id,
                        %user,
                        attempt,
                        "copy borrowed"
                    );
                    return Ok(Receipt {
                        return_date: now.date_naive(),
                        item: copy.item().clone(),
                    });
                }
                Err(e) if e.is_out_of_stock() => {
                    debug!(
                        title,
                        %item_type,
                        unique_id = %copy.item().unique_id,
                        attempt,
                        "lost race for copy, rescanning"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        debug!(title, %item_type, %user, "out of stock");
        Err(LendingError::out_of_stock(title, item_type))
    }

    /// Return the exact copy identified by `item.unique_id`.
    ///
    /// The copy is released whether or not it was borrowed.
    ///
    /// # Errors
    ///
    /// - `UnknownItem` if the title and type are not in the catalog.
    /// - `UnknownCopy` if they are, but no copy has this unique id.
    pub fn return_item(&self, item: &Item) -> LendingResult<()> {
        if !self.index.contains(&item.title, item.item_type) {
            return Err(LendingError::unknown_item(
                item.title.clone(),
                item.item_type,
                item.unique_id.clone(),
            ));
        }

        let copy = self
            .index
            .lookup(&item.title, item.item_type)
            .iter()
            .find(|copy| copy.has_id(&item.unique_id))
            .ok_or_else(|| {
                LendingError::unknown_copy(
                    item.title.clone(),
                    item.item_type,
                    item.unique_id.clone(),
                )
            })?;

        let previous = copy.release();
        match previous.borrowed_by() {
            Some(user) => debug!(
                title = %item.title,
                item_type = %item.item_type,
                unique_id = %item.unique_id,
                %user,
                "copy returned"
            ),
            None => warn!(
                title = %item.title,
                item_type = %item.item_type,
                unique_id = %item.unique_id,
                "returned a copy that was not borrowed"
            ),
        }

        Ok(())
    }

    /// Items of every copy currently on the shelf.
    pub fn current_inventory(&self) -> Vec<Item> {
        self.index
            .copies()
            .filter(|copy| copy.is_available())
            .map(|copy| copy.item().clone())
            .collect()
    }

    /// Items borrowed strictly before `today - overdue_after_days`.
    pub fn overdue_items(&self) -> Vec<Item> {
        let today = self.clock.now().date_naive();
        let Some(cutoff) = today.checked_sub_signed(self.config.overdue_after()) else {
            return Vec::new();
        };

        self.index
            .copies()
            .filter(|copy| copy.borrowed_on().is_some_and(|on| on < cutoff))
            .map(|copy| copy.item().clone())
            .collect()
    }

    /// Items currently borrowed by `user`.
    pub fn borrowed_items(&self, user: &User) -> Vec<Item> {
        self.index
            .copies()
            .filter(|copy| copy.borrowed_by().as_ref() == Some(user))
            .map(|copy| copy.item().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use lending_core::{FixedClock, ManualClock};
    use proptest::prelude::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    fn ada() -> User {
        User::new("ada")
    }

    fn shelf() -> Vec<Item> {
        vec![
            Item::dvd("1", "7", "Pi"),
            Item::dvd("2", "7", "Pi"),
            Item::book("3", "4", "Introduction to Algorithms"),
            Item::vhs("4", "5", "WarGames"),
        ]
    }

    #[test]
    fn inventory_lists_every_item_initially() {
        let library = Library::new(FixedClock::new(start()), shelf());
        assert_eq!(library.current_inventory(), shelf());
    }

    #[test]
    fn borrow_returns_receipt_dated_today() {
        let library = Library::new(FixedClock::new(start()), shelf());

        let receipt = library
            .borrow("Introduction to Algorithms", ItemType::Book, &ada())
            .unwrap();

        assert_eq!(receipt.return_date, start().date_naive());
        assert_eq!(receipt.item, Item::book("3", "4", "Introduction to Algorithms"));
    }

    #[test]
    fn two_copies_then_out_of_stock() {
        let library = Library::new(FixedClock::new(start()), shelf());

        let first = library.borrow("Pi", ItemType::DVD, &ada()).unwrap();
        let second = library.borrow("Pi", ItemType::DVD, &ada()).unwrap();
        assert_ne!(first.item.unique_id, second.item.unique_id);

        let err = library.borrow("Pi", ItemType::DVD, &ada()).unwrap_err();
        assert!(err.is_out_of_stock());
        assert_eq!(err.to_string(), "The Pi DVD is currently out of stock");
    }

    #[test]
    fn borrowing_unknown_title_is_not_found() {
        let library = Library::new(FixedClock::new(start()), Vec::new());

        let err = library
            .borrow("Unknown Title", ItemType::VHS, &ada())
            .unwrap_err();
        assert!(matches!(err, LendingError::NotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Could not find the VHS, Unknown Title, you want to borrow"
        );
    }

    #[test]
    fn type_is_part_of_the_key() {
        let library = Library::new(FixedClock::new(start()), shelf());
        let err = library.borrow("Pi", ItemType::Book, &ada()).unwrap_err();
        assert!(matches!(err, LendingError::NotFound { .. }));
    }

    #[test]
    fn return_puts_the_copy_back() {
        let items = vec![Item::dvd("1", "7", "Pi")];
        let library = Library::new(FixedClock::new(start()), items.clone());

        let receipt = library.borrow("Pi", ItemType::DVD, &ada()).unwrap();
        assert!(library.current_inventory().is_empty());

        library.return_item(&receipt.item).unwrap();
        assert_eq!(library.current_inventory(), items);
    }

    #[test]
    fn returning_unknown_title_is_unknown_item() {
        let library = Library::new(FixedClock::new(start()), vec![Item::dvd("1", "7", "Pi")]);

        let err = library
            .return_item(&Item::book("1", "1", "some random item"))
            .unwrap_err();
        assert!(matches!(err, LendingError::UnknownItem { .. }));
        assert_eq!(
            err.to_string(),
            "Could not the item: some random item, Book with id 1"
        );
    }

    #[test]
    fn returning_unknown_copy_id_is_unknown_copy() {
        let library = Library::new(FixedClock::new(start()), vec![Item::dvd("1", "7", "Pi")]);

        let err = library.return_item(&Item::dvd("2", "7", "Pi")).unwrap_err();
        assert!(matches!(err, LendingError::UnknownCopy { .. }));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Could not the item: Pi, DVD with id 2");
    }

    #[test]
    fn returning_an_available_copy_is_accepted() {
        let items = vec![Item::dvd("1", "7", "Pi")];
        let library = Library::new(FixedClock::new(start()), items.clone());

        library.return_item(&items[0]).unwrap();
        assert_eq!(library.current_inventory(), items);
    }

    #[test]
    fn overdue_after_seven_days() {
        let clock = Arc::new(ManualClock::new(start()));
        let library = Library::new(
            clock.clone(),
            vec![Item::dvd("1", "7", "Pi"), Item::dvd("2", "7", "Pi 2")],
        );

        library.borrow("Pi", ItemType::DVD, &ada()).unwrap();

        clock.advance(Duration::days(6));
        assert!(library.overdue_items().is_empty());

        clock.set(start() + Duration::days(7));
        assert!(library.overdue_items().is_empty());

        clock.set(start() + Duration::days(8));
        assert_eq!(library.overdue_items(), vec![Item::dvd("1", "7", "Pi")]);
    }

    #[test]
    fn overdue_threshold_is_configurable() {
        let clock = Arc::new(ManualClock::new(start()));
        let library = Library::with_config(
            clock.clone(),
            vec![Item::vhs("4", "5", "WarGames")],
            LibraryConfig::default().with_overdue_after_days(1),
        );
        assert_eq!(library.config().overdue_after_days, 1);

        library.borrow("WarGames", ItemType::VHS, &ada()).unwrap();
        clock.advance(Duration::days(2));
        assert_eq!(library.overdue_items().len(), 1);
    }

    #[test]
    fn returned_copies_are_not_overdue() {
        let clock = Arc::new(ManualClock::new(start()));
        let library = Library::new(clock.clone(), vec![Item::dvd("1", "7", "Pi")]);

        let receipt = library.borrow("Pi", ItemType::DVD, &ada()).unwrap();
        clock.advance(Duration::days(30));
        library.return_item(&receipt.item).unwrap();

        assert!(library.overdue_items().is_empty());
    }

    #[test]
    fn borrowed_items_are_per_user() {
        let library = Library::new(FixedClock::new(start()), shelf());
        let grace = User::new("grace");

        library.borrow("Pi", ItemType::DVD, &ada()).unwrap();
        library.borrow("WarGames", ItemType::VHS, &grace).unwrap();
        library.borrow("Pi", ItemType::DVD, &grace).unwrap();

        assert_eq!(library.borrowed_items(&ada()), vec![Item::dvd("1", "7", "Pi")]);
        assert_eq!(
            library.borrowed_items(&grace),
            vec![Item::dvd("2", "7", "Pi"), Item::vhs("4", "5", "WarGames")]
        );
        assert!(library.borrowed_items(&User::new("nobody")).is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: borrowing any title and returning the same copy leaves the
        /// inventory exactly as it was.
        #[test]
        fn borrow_then_return_restores_inventory(pick in 0usize..4) {
            let items = shelf();
            let library = Library::new(FixedClock::new(start()), items.clone());
            let target = &items[pick];

            let before = library.current_inventory();
            let receipt = library.borrow(&target.title, target.item_type, &ada()).unwrap();
            prop_assert!(!library.current_inventory().contains(&receipt.item));

            library.return_item(&receipt.item).unwrap();
            prop_assert_eq!(library.current_inventory(), before);
        }

        /// Property: with no borrow or return in between, two inventory scans agree.
        #[test]
        fn inventory_is_stable_without_activity(borrows in prop::collection::vec(0usize..4, 0..6)) {
            let items = shelf();
            let library = Library::new(FixedClock::new(start()), items.clone());
            for pick in borrows {
                let target = &items[pick];
                let _ = library.borrow(&target.title, target.item_type, &ada());
            }

            prop_assert_eq!(library.current_inventory(), library.current_inventory());
        }
    }
}
