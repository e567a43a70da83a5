//! Things with a stable identity whose state changes over time.

/// A physical copy is the canonical entity here: it is borrowed and returned
/// many times but is always the same copy, found by its unique id.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// True if this entity carries `id`, regardless of its current state.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
