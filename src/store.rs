//! The in-memory item store.
//!
//! [`ItemStore`] keeps items in a `Vec` behind a single `Mutex`, in insertion
//! order. Every operation takes the lock exactly once, so each one is atomic
//! with respect to the others. Data lives as long as the store does.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::item::{Item, ItemPatch, NewItem};

/// An ordered, process-local collection of items.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Mutex<Vec<Item>>,
}

impl ItemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the two startup items.
    pub fn seeded() -> Self {
        let seeds = (1..=2)
            .map(|n| Item {
                id: n,
                name: format!("Item {n}"),
                description: Some(format!("This is item {n}")),
            })
            .collect();
        Self { items: Mutex::new(seeds) }
    }

    /// All items in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.lock().clone()
    }

    /// The first item with `id`, if any.
    pub fn get(&self, id: u64) -> Option<Item> {
        self.lock().iter().find(|item| item.id == id).cloned()
    }

    /// Appends a new item and returns it.
    ///
    /// The id is one past the id of the current last item, or `1` when the
    /// store is empty. Deleting the last item therefore frees its id for reuse.
    pub fn create(&self, new: NewItem) -> Item {
        let mut items = self.lock();
        let id = items.last().map_or(1, |last| last.id + 1);
        let item = new.into_item(id);
        items.push(item.clone());
        debug!(id, "item created");
        item
    }

    /// Applies `patch` to the first item with `id` and returns the result.
    pub fn update(&self, id: u64, patch: ItemPatch) -> Option<Item> {
        let mut items = self.lock();
        let item = items.iter_mut().find(|item| item.id == id)?;
        patch.apply(item);
        debug!(id, "item updated");
        Some(item.clone())
    }

    /// Removes every item with `id` and returns how many were removed.
    pub fn delete(&self, id: u64) -> usize {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|item| item.id != id);
        let removed = before - items.len();
        debug!(id, removed, "items deleted");
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // No operation can leave the vector half-modified, so a poisoned lock
    // still guards a consistent collection.
    fn lock(&self) -> MutexGuard<'_, Vec<Item>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
