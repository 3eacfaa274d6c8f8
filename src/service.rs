use crate::{
    domain::{Item, ItemId, ItemStore},
    view::FilterView,
};

/// Mutation facade wiring a store to its view.
///
/// The UI layer drives this from its event handlers: one call per user
/// action, each running to completion (store mutation plus view recompute)
/// before the next. Store-level rejections — empty text, ids no longer
/// present — are swallowed here, so the worst case at the UI boundary is an
/// action with no visible effect.
#[derive(Debug)]
pub struct TodoService {
    store: ItemStore,
    view: FilterView,
}

impl TodoService {
    pub fn new() -> Self {
        Self::from_store(ItemStore::new())
    }

    /// Builds a service around an existing store, e.g. one rebuilt from
    /// [`ItemStore::from_json`]
    pub fn from_store(mut store: ItemStore) -> Self {
        let view = FilterView::subscribed_to(&mut store);
        Self { store, view }
    }

    /// Adds an item. Returns `None` when the text is empty after trimming
    /// (the input surface caps length at [`crate::domain::MAX_TEXT_LEN`]).
    pub fn add(&mut self, text: &str) -> Option<Item> {
        let added = self.store.add(text).ok();
        self.view.refresh();
        added
    }

    /// Deletes by id; deleting an id that is already gone does nothing
    pub fn remove(&mut self, id: ItemId) {
        let _ = self.store.remove(id);
        self.view.refresh();
    }

    /// Replaces an item's text. `None` models a cancelled edit prompt and
    /// leaves everything unchanged.
    pub fn update_text(&mut self, id: ItemId, new_text: Option<&str>) {
        if let Some(text) = new_text {
            let _ = self.store.update_text(id, text);
            self.view.refresh();
        }
    }

    pub fn toggle_complete(&mut self, id: ItemId) {
        let _ = self.store.toggle_complete(id);
        self.view.refresh();
    }

    /// Applies a search query to the view; empty restores the full list
    pub fn search(&mut self, query: &str) {
        self.view.set_query(query);
    }

    /// Swaps two positions in the displayed sequence (drag-and-drop drop
    /// handler). Out-of-range indices do nothing.
    pub fn reorder(&mut self, source: usize, target: usize) {
        self.view.reorder(source, target);
    }

    /// Canonical order, authoritative regardless of view state
    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    /// What the rendering layer should show
    pub fn displayed(&self) -> &[Item] {
        self.view.displayed()
    }

    pub fn query(&self) -> &str {
        self.view.query()
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }
}

impl Default for TodoService {
    fn default() -> Self {
        Self::new()
    }
}
