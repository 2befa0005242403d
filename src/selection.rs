//! Ordered set of selected item ids.
//!
//! The manager only tracks ids. The canvas owns the registry, so it mirrors
//! membership onto `Item::selected` and emits the domain events.

use std::collections::BTreeSet;

use crate::types::ItemId;

#[derive(Debug, Default, Clone)]
pub struct SelectionManager {
    selected: BTreeSet<ItemId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.selected.iter()
    }

    /// Snapshot of the selected ids, safe to hold while mutating.
    pub fn to_vec(&self) -> Vec<ItemId> {
        self.selected.iter().cloned().collect()
    }

    /// Returns true if the id was newly added.
    pub fn insert(&mut self, id: ItemId) -> bool {
        self.selected.insert(id)
    }

    /// Returns true if the id was present.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        self.selected.remove(id)
    }

    /// Remove everything except `keep`, returning the removed ids.
    pub fn retain_only(&mut self, keep: &ItemId) -> Vec<ItemId> {
        let removed: Vec<ItemId> = self
            .selected
            .iter()
            .filter(|id| *id != keep)
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }
        removed
    }

    /// Remove everything, returning the removed ids.
    pub fn clear(&mut self) -> Vec<ItemId> {
        std::mem::take(&mut self.selected).into_iter().collect()
    }
}
