use crate::{
    domain::item::{Item, ItemId},
    error::{ListaError, Result},
};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};

/// What changed in the store. Structural kinds alter the canonical sequence
/// itself; the others mutate one item in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added(ItemId),
    Removed(ItemId),
    TextChanged(ItemId),
    CompletionToggled(ItemId),
    Restored,
}

impl ChangeKind {
    /// True for changes that alter the canonical sequence itself
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Added(_) | Self::Removed(_) | Self::Restored)
    }
}

/// Change notification sent to subscribers after every successful mutation.
/// Carries the full canonical order so subscribers never have to re-query
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEvent {
    pub kind: ChangeKind,
    pub items: Vec<Item>,
}

/// Serializable copy of the full store state. Includes the id counter so a
/// restored store keeps the never-reuse-ids guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub items: Vec<Item>,
    pub next_id: u64,
}

/// Ordered collection of to-do items. Insertion order is the canonical
/// order; ids are unique and assigned from a monotonic counter.
///
/// The store is the single writer of item state. Views subscribe and receive
/// a [`StoreEvent`] after each mutation instead of reaching back in.
#[derive(Debug)]
pub struct ItemStore {
    items: Vec<Item>,
    next_id: u64,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber. Events are delivered synchronously on the
    /// mutating call; receivers that have been dropped are pruned on the
    /// next delivery.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Adds an item with the next id, appended to the end of the canonical
    /// order. Rejects text that is empty after trimming; the 100-character
    /// cap is the input surface's concern, not the store's.
    pub fn add(&mut self, text: &str) -> Result<Item> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ListaError::EmptyText);
        }

        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        let item = Item::new(id, trimmed.to_string());
        self.items.push(item.clone());

        self.publish(ChangeKind::Added(id));
        Ok(item)
    }

    /// Removes the item with the given id, returning it. Ids are never
    /// reassigned, so a second removal of the same id reports not-found.
    pub fn remove(&mut self, id: ItemId) -> Result<Item> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(ListaError::ItemNotFound(id))?;
        let removed = self.items.remove(pos);

        self.publish(ChangeKind::Removed(id));
        Ok(removed)
    }

    /// Replaces the text of the item with the given id. The completion flag
    /// is untouched.
    pub fn update_text(&mut self, id: ItemId, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ListaError::EmptyText);
        }

        self.item_mut(id)?.set_text(trimmed.to_string());

        self.publish(ChangeKind::TextChanged(id));
        Ok(())
    }

    /// Flips the completion flag of the item with the given id and returns
    /// the new value. The text is untouched.
    pub fn toggle_complete(&mut self, id: ItemId) -> Result<bool> {
        let complete = self.item_mut(id)?.toggle_complete();

        self.publish(ChangeKind::CompletionToggled(id));
        Ok(complete)
    }

    /// Items in canonical order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copies the full state, including the id counter
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            items: self.items.clone(),
            next_id: self.next_id,
        }
    }

    /// Replaces the store contents from a snapshot and notifies subscribers.
    /// The counter is clamped so it stays strictly above every restored id.
    pub fn restore(&mut self, snapshot: StoreSnapshot) {
        let max_id = snapshot
            .items
            .iter()
            .map(|item| item.id.value())
            .max()
            .unwrap_or(0);
        self.items = snapshot.items;
        self.next_id = snapshot.next_id.max(max_id + 1);

        self.publish(ChangeKind::Restored);
    }

    /// Serializes the full state to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Builds a store from the JSON produced by [`ItemStore::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        let mut store = Self::new();
        store.restore(snapshot);
        Ok(store)
    }

    fn item_mut(&mut self, id: ItemId) -> Result<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ListaError::ItemNotFound(id))
    }

    fn publish(&mut self, kind: ChangeKind) {
        let event = StoreEvent {
            kind,
            items: self.items.clone(),
        };
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}
