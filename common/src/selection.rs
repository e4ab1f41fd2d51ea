//! Multi-select state for bulk actions.
//!
//! The selection is independent of the filtered view: an id stays selected
//! when a filter hides its record, and only leaves the set when toggled,
//! cleared, or when its record is deleted.

use std::collections::BTreeSet;

use crate::model::Record;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct Selection<Id> {
    ids: BTreeSet<Id>,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }
}

impl<Id: Ord + Clone> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it if present. Returns whether it is
    /// selected afterwards.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.ids.iter()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops `id` after its record was deleted outside a bulk action.
    /// When it was the only member the selection ends up empty.
    pub fn forget(&mut self, id: &Id) {
        self.ids.remove(id);
    }

    /// Selected ids whose records still exist in `store`, in id order.
    pub fn live_ids<R>(&self, store: &RecordStore<R>) -> Vec<Id>
    where
        R: Record<Id = Id>,
    {
        self.ids
            .iter()
            .filter(|id| store.contains(id))
            .cloned()
            .collect()
    }

    /// Runs `action` on every selected record still present in `store`,
    /// then clears the selection. Ids of deleted records are skipped.
    /// Returns the ids the action was applied to.
    pub fn bulk_apply<R>(
        &mut self,
        store: &mut RecordStore<R>,
        mut action: impl FnMut(&mut R),
    ) -> Vec<Id>
    where
        R: Record<Id = Id>,
    {
        let targets = self.live_ids(store);
        for id in &targets {
            store.update(id, &mut action);
        }
        self.clear();
        targets
    }

    /// Removes every selected record still present in `store`, then clears
    /// the selection. Returns the removed records.
    pub fn bulk_remove<R>(&mut self, store: &mut RecordStore<R>) -> Vec<R>
    where
        R: Record<Id = Id>,
    {
        let removed = self
            .live_ids(store)
            .iter()
            .filter_map(|id| store.remove(id))
            .collect();
        self.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u64,
        done: bool,
    }

    impl Record for Item {
        type Id = u64;

        fn id(&self) -> u64 {
            self.id
        }
    }

    fn store() -> RecordStore<Item> {
        RecordStore::from_records((1..=3).map(|id| Item { id, done: false }).collect())
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let mut selection = Selection::new();
        selection.toggle(1);
        let before: Vec<_> = selection.iter().copied().collect();
        assert!(selection.toggle(2));
        assert!(!selection.toggle(2));
        assert_eq!(selection.iter().copied().collect::<Vec<_>>(), before);
    }

    #[test]
    fn bulk_apply_skips_deleted_ids() {
        let mut store = store();
        let mut selection = Selection::new();
        selection.toggle(1);
        selection.toggle(3);
        store.remove(&3);

        let touched = selection.bulk_apply(&mut store, |item| item.done = true);

        assert_eq!(touched, vec![1]);
        assert!(selection.is_empty());
        assert!(store.get(&1).unwrap().done);
        assert!(!store.get(&2).unwrap().done);
    }

    #[test]
    fn bulk_remove_only_touches_live_selected_records() {
        let mut store = store();
        let mut selection = Selection::new();
        selection.toggle(2);
        selection.toggle(42);

        let removed = selection.bulk_remove(&mut store);

        assert_eq!(removed.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(store.len(), 2);
        assert!(selection.is_empty());
    }

    #[test]
    fn forgetting_only_member_empties_selection() {
        let mut selection = Selection::new();
        selection.toggle(7);
        selection.forget(&7);
        assert!(selection.is_empty());
    }
}
