use crate::domain::{ChangeKind, Item, ItemStore, StoreEvent};
use std::sync::mpsc::Receiver;

/// Derived, user-facing ordering of the store's items.
///
/// The view owns no canonical state: it keeps a snapshot of the store's
/// order (fed by store events), the active search query, and the `displayed`
/// sequence the rendering layer consumes. Searching and drag-reordering act
/// on `displayed` only and never write back to the store.
///
/// Reset policy on store changes:
/// - a structural change (add/remove/restore) discards all transient view
///   state: the query is cleared and `displayed` becomes the canonical order;
/// - a text change refreshes the edited item in place, except under an
///   active query, where the filter is recomputed from canonical order since
///   the edit may have changed which items match;
/// - a completion toggle refreshes the item in place and keeps order and
///   query, since toggling never affects matching.
#[derive(Debug)]
pub struct FilterView {
    events: Receiver<StoreEvent>,
    canonical: Vec<Item>,
    query: String,
    displayed: Vec<Item>,
}

impl FilterView {
    /// Creates a view subscribed to the given store, seeded with its
    /// current canonical order.
    pub fn subscribed_to(store: &mut ItemStore) -> Self {
        let events = store.subscribe();
        let canonical = store.items().to_vec();
        Self {
            events,
            displayed: canonical.clone(),
            canonical,
            query: String::new(),
        }
    }

    /// Drains pending store events and applies each in order. Call after
    /// every store mutation.
    pub fn refresh(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
        }
    }

    /// Sets the search query and recomputes `displayed` as the subset of
    /// the canonical order matching it case-insensitively, canonical
    /// relative order preserved. An empty query restores the full
    /// canonical order.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.displayed = self.filtered();
    }

    /// Swaps the occupants of two positions in the displayed sequence.
    /// View-local: the canonical order is untouched, and the swap is
    /// discarded on the next structural store change. Out-of-range indices
    /// make this a no-op.
    pub fn reorder(&mut self, source: usize, target: usize) {
        if source >= self.displayed.len() || target >= self.displayed.len() {
            return;
        }
        self.displayed.swap(source, target);
    }

    /// The sequence the rendering layer should show, in order
    pub fn displayed(&self) -> &[Item] {
        &self.displayed
    }

    /// The active search query, empty when no filter is applied
    pub fn query(&self) -> &str {
        &self.query
    }

    fn apply(&mut self, event: StoreEvent) {
        self.canonical = event.items;
        match event.kind {
            kind if kind.is_structural() => {
                self.query.clear();
                self.displayed = self.canonical.clone();
            }
            ChangeKind::TextChanged(_) if !self.query.is_empty() => {
                self.displayed = self.filtered();
            }
            _ => self.refresh_payloads(),
        }
    }

    fn filtered(&self) -> Vec<Item> {
        self.canonical
            .iter()
            .filter(|item| item.matches(&self.query))
            .cloned()
            .collect()
    }

    /// Re-copies item payloads into `displayed` by id, keeping the current
    /// display order intact.
    fn refresh_payloads(&mut self) {
        for entry in &mut self.displayed {
            if let Some(updated) = self.canonical.iter().find(|item| item.id == entry.id) {
                *entry = updated.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    fn store_with(texts: &[&str]) -> ItemStore {
        let mut store = ItemStore::new();
        for text in texts {
            store.add(text).unwrap();
        }
        store
    }

    #[test]
    fn test_seeded_with_canonical_order() {
        let mut store = store_with(&["Buy milk", "Walk dog"]);
        let view = FilterView::subscribed_to(&mut store);

        assert_eq!(view.displayed(), store.items());
        assert_eq!(view.query(), "");
    }

    #[test]
    fn test_query_filters_case_insensitively() {
        let mut store = store_with(&["Buy milk", "Walk the Dog", "Dog park"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.set_query("dog");

        let texts: Vec<&str> = view.displayed().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["Walk the Dog", "Dog park"]);
    }

    #[test]
    fn test_query_preserves_canonical_relative_order() {
        let mut store = store_with(&["apple pie", "banana", "apple juice", "cherry", "apple tart"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.set_query("APPLE");

        let ids: Vec<ItemId> = view.displayed().iter().map(|i| i.id).collect();
        assert_eq!(ids, [ItemId::new(1), ItemId::new(3), ItemId::new(5)]);
    }

    #[test]
    fn test_empty_query_restores_full_order() {
        let mut store = store_with(&["Buy milk", "Walk dog"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.set_query("dog");
        assert_eq!(view.displayed().len(), 1);

        view.set_query("");
        assert_eq!(view.displayed(), store.items());
    }

    #[test]
    fn test_query_with_no_matches_is_empty() {
        let mut store = store_with(&["Buy milk"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.set_query("xyzzy");
        assert!(view.displayed().is_empty());
    }

    #[test]
    fn test_reorder_swaps_exactly_two() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.reorder(0, 2);

        let texts: Vec<&str> = view.displayed().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["c", "b", "a", "d"]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut store = store_with(&["a", "b"]);
        let mut view = FilterView::subscribed_to(&mut store);
        let before = view.displayed().to_vec();

        view.reorder(0, 2);
        view.reorder(5, 0);
        view.reorder(7, 9);

        assert_eq!(view.displayed(), before);
    }

    #[test]
    fn test_reorder_does_not_touch_canonical_order() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.reorder(0, 2);

        let canonical: Vec<&str> = store.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(canonical, ["a", "b", "c"]);
    }

    #[test]
    fn test_structural_change_resets_view_and_query() {
        let mut store = store_with(&["Buy milk", "Walk dog"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.set_query("dog");
        store.add("Dog park").unwrap();
        view.refresh();

        assert_eq!(view.query(), "");
        assert_eq!(view.displayed(), store.items());
    }

    #[test]
    fn test_removal_resets_manual_reorder() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.reorder(0, 2);
        let b_id = store.items()[1].id;
        store.remove(b_id).unwrap();
        view.refresh();

        let texts: Vec<&str> = view.displayed().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn test_toggle_refreshes_in_place() {
        let mut store = store_with(&["Walk dog", "Dog park"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.set_query("dog");
        view.reorder(0, 1);

        let toggled = view.displayed()[1].id;
        store.toggle_complete(toggled).unwrap();
        view.refresh();

        // Order and query survive; the flag is updated
        assert_eq!(view.query(), "dog");
        assert_eq!(view.displayed().len(), 2);
        assert!(view.displayed()[1].complete);
        assert_eq!(view.displayed()[1].id, toggled);
    }

    #[test]
    fn test_text_edit_under_query_recomputes_filter() {
        let mut store = store_with(&["Walk dog", "Dog park"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.set_query("dog");
        assert_eq!(view.displayed().len(), 2);

        let first = view.displayed()[0].id;
        store.update_text(first, "Walk cat").unwrap();
        view.refresh();

        let texts: Vec<&str> = view.displayed().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["Dog park"]);
        assert_eq!(view.query(), "dog");
    }

    #[test]
    fn test_text_edit_without_query_keeps_display_order() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut view = FilterView::subscribed_to(&mut store);

        view.reorder(0, 2);
        let edited = view.displayed()[0].id;
        store.update_text(edited, "c2").unwrap();
        view.refresh();

        let texts: Vec<&str> = view.displayed().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["c2", "b", "a"]);
    }
}
