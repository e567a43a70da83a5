//! Physical copies and their borrow state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};

use lending_core::{Entity, LendingError, LendingResult, UniqueId};

use crate::item::{Item, User};

/// Borrow state of a single copy.
///
/// A copy is either fully available or fully claimed; there is no state in
/// which a borrower is recorded without a timestamp or the other way round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CopyState {
    #[default]
    Available,
    Borrowed { by: User, at: DateTime<Utc> },
}

impl CopyState {
    pub fn is_available(&self) -> bool {
        matches!(self, CopyState::Available)
    }

    pub fn borrowed_by(&self) -> Option<&User> {
        match self {
            CopyState::Available => None,
            CopyState::Borrowed { by, .. } => Some(by),
        }
    }

    pub fn borrowed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            CopyState::Available => None,
            CopyState::Borrowed { at, .. } => Some(*at),
        }
    }
}

/// One physical instance of a catalog item.
///
/// Each copy owns its own guard. Copies never share a lock, so claims on
/// different copies proceed in parallel.
#[derive(Debug)]
pub struct StockCopy {
    item: Item,
    state: Mutex<CopyState>,
}

impl StockCopy {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            state: Mutex::new(CopyState::Available),
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    // Every write replaces the whole enum, so a poisoned guard still holds a
    // consistent state.
    fn lock(&self) -> MutexGuard<'_, CopyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomically claim this copy for `user`.
    ///
    /// Fails with `OutOfStock` if the copy is already borrowed. Of any number
    /// of concurrent callers on an available copy, exactly one succeeds.
    pub fn try_borrow(&self, user: &User, now: DateTime<Utc>) -> LendingResult<()> {
        let mut state = self.lock();
        if !state.is_available() {
            return Err(LendingError::out_of_stock(
                self.item.title.clone(),
                self.item.item_type,
            ));
        }

        *state = CopyState::Borrowed {
            by: user.clone(),
            at: now,
        };
        Ok(())
    }

    /// Atomically make this copy available again, returning the state it had.
    ///
    /// Releasing an already-available copy is not rejected here.
    pub fn release(&self) -> CopyState {
        std::mem::take(&mut *self.lock())
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CopyState {
        self.lock().clone()
    }

    pub fn is_available(&self) -> bool {
        self.lock().is_available()
    }

    /// UTC calendar date of the current borrow, if any.
    pub fn borrowed_on(&self) -> Option<NaiveDate> {
        self.lock().borrowed_at().map(|at| at.date_naive())
    }

    pub fn borrowed_by(&self) -> Option<User> {
        self.lock().borrowed_by().cloned()
    }
}

impl Entity for StockCopy {
    type Id = UniqueId;

    fn id(&self) -> &Self::Id {
        &self.item.unique_id
    }
}
