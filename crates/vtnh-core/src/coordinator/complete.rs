//! Navigation completion

use super::{stored_or_derived, Coordinator};
use crate::dom::Document;
use crate::selector::{compute_selector, resolve_selector};
use crate::storage::{KeyValueStore, StoredTransition};

impl<D: Document, S: KeyValueStore> Coordinator<D, S> {
    /// Advance to `key` and name the arriving elements.
    ///
    /// With departures pending this is a forward navigation: each departure
    /// is matched to its arrival by attribute, named, and the pairing is
    /// stored in both directions. Otherwise it is a history navigation and
    /// the stored (new → previous) pairing is replayed. Either way the
    /// coordinator ends idle.
    pub fn on_navigation_complete(&mut self, key: Option<&str>) {
        let key = self.key_or_initial(key);
        let previous = std::mem::replace(&mut self.current_key, key);
        self.previous_key = Some(previous.clone());

        if self.pending.is_empty() {
            self.replay_arrival(&previous);
        } else {
            self.resolve_arrivals(&previous);
        }
    }

    fn resolve_arrivals(&mut self, previous: &str) {
        let pending = std::mem::take(&mut self.pending);
        let mut forward = Vec::with_capacity(pending.len());
        let mut reverse = Vec::with_capacity(pending.len());

        for entry in &pending {
            if entry.to_attribute_value.is_empty() {
                continue;
            }
            let Some(arrival) = self
                .document
                .find_by_attribute(&entry.to_attribute_name, &entry.to_attribute_value)
            else {
                tracing::debug!(
                    attribute = %entry.to_attribute_name,
                    value = %entry.to_attribute_value,
                    "no arrival element"
                );
                continue;
            };

            self.registry
                .assign(&self.document, Some(&arrival), &entry.effective_name());
            let arrival_selector = compute_selector(&self.document, &arrival, &self.config.root_tag);

            // Both lists stay index-aligned: history replay pairs them by position.
            forward.push(StoredTransition::new(
                entry.transition_name.clone(),
                entry.from_selector.clone(),
            ));
            reverse.push(StoredTransition::new(entry.transition_name.clone(), arrival_selector));
        }

        tracing::debug!(
            from = previous,
            to = %self.current_key,
            matched = forward.len(),
            pending = pending.len(),
            "forward navigation complete"
        );

        self.persist(previous, &self.current_key, &forward);
        self.persist(&self.current_key, previous, &reverse);
    }

    fn replay_arrival(&mut self, previous: &str) {
        let entries = self.load_or_empty(&self.current_key, previous);
        tracing::debug!(
            from = previous,
            to = %self.current_key,
            entries = entries.len(),
            "history navigation complete"
        );

        for entry in &entries {
            let name = stored_or_derived(entry, &entry.from_selector);
            let element = resolve_selector(&self.document, &entry.from_selector, &self.config.root_tag);
            self.registry.assign(&self.document, element.as_ref(), &name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::coordinator::{CoordinatorState, TransitionRequest};
    use crate::error::StoreError;

    #[test]
    fn test_forward_names_arrival_and_stores_both_directions() {
        let mut coordinator = create_test_coordinator();
        coordinator.on_navigation_complete(Some("page1"));
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg"]);

        coordinator.on_transition_start([TransitionRequest::new(images[1], "/b.jpg")]);
        let detail = render_detail(&coordinator, "/b.jpg");
        coordinator.on_navigation_complete(Some("page2"));

        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert_eq!(coordinator.current_key(), "page2");
        assert_eq!(coordinator.previous_key(), Some("page1"));
        assert_eq!(
            coordinator.document().transition_name(&detail).as_deref(),
            Some("MAINnthchild1IMGnthchild2")
        );

        let forward = coordinator.pairings().load("page1", "page2").unwrap();
        assert_eq!(forward, vec![StoredTransition::new("", "MAIN:nth-child(1)>IMG:nth-child(2)")]);
        let reverse = coordinator.pairings().load("page2", "page1").unwrap();
        assert_eq!(
            reverse,
            vec![StoredTransition::new("", "ARTICLE:nth-child(1)>IMG:nth-child(2)")]
        );
    }

    #[test]
    fn test_missing_key_defaults_to_initial() {
        let mut coordinator = create_test_coordinator();
        coordinator.on_navigation_complete(Some("page1"));
        coordinator.on_navigation_complete(None);
        assert_eq!(coordinator.current_key(), "initial");
        assert_eq!(coordinator.previous_key(), Some("page1"));
    }

    #[test]
    fn test_unmatched_entries_are_dropped_and_pending_cleared() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg"]);

        coordinator.on_transition_start([
            TransitionRequest::new(images[0], "/missing.jpg").with_name("gone"),
            TransitionRequest::new(images[1], "/b.jpg").with_name("kept"),
        ]);
        render_detail(&coordinator, "/b.jpg");
        coordinator.on_navigation_complete(Some("page2"));

        assert!(coordinator.pending().is_empty());
        let forward = coordinator.pairings().load("initial", "page2").unwrap();
        let reverse = coordinator.pairings().load("page2", "initial").unwrap();
        assert_eq!(forward.len(), 1);
        assert_eq!(reverse.len(), 1);
        assert_eq!(forward[0].transition_name, "kept");
        assert_eq!(reverse[0].transition_name, "kept");
    }

    #[test]
    fn test_empty_attribute_value_never_matches() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &[""]);

        coordinator.on_transition_start([TransitionRequest::new(images[0], "")]);
        coordinator.on_navigation_complete(Some("page2"));

        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert!(coordinator.pairings().load("initial", "page2").unwrap().is_empty());
    }

    #[test]
    fn test_same_target_last_write_wins() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg"]);

        coordinator.on_transition_start([
            TransitionRequest::new(images[0], "/x.jpg").with_name("first"),
            TransitionRequest::new(images[1], "/x.jpg").with_name("second"),
        ]);
        let detail = render_detail(&coordinator, "/x.jpg");
        coordinator.on_navigation_complete(Some("page2"));

        assert_eq!(
            coordinator.document().transition_name(&detail).as_deref(),
            Some("second")
        );
        assert!(coordinator.registry().holder("first").is_none());
    }

    #[test]
    fn test_history_complete_replays_stored_pairing() {
        let mut coordinator = create_test_coordinator();
        coordinator.on_navigation_complete(Some("grid"));
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg"]);
        coordinator.on_transition_start([TransitionRequest::new(images[1], "/b.jpg")]);
        render_detail(&coordinator, "/b.jpg");
        coordinator.on_navigation_complete(Some("detail"));

        // Back to the grid: no start, the router pops history.
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg"]);
        coordinator.on_navigation_complete(Some("grid"));

        assert_eq!(coordinator.previous_key(), Some("detail"));
        assert_eq!(
            coordinator.document().transition_name(&images[1]).as_deref(),
            Some("MAINnthchild1IMGnthchild2")
        );
        assert_eq!(coordinator.document().transition_name(&images[0]), None);
    }

    #[test]
    fn test_history_complete_does_not_write() {
        let mut coordinator = create_test_coordinator();
        coordinator.on_navigation_complete(Some("a"));
        coordinator.on_navigation_complete(Some("b"));
        assert!(coordinator.pairings().store().is_empty());
    }

    #[test]
    fn test_history_complete_with_corrupt_pairing() {
        let mut coordinator = create_test_coordinator();
        coordinator.on_navigation_complete(Some("a"));
        let images = render_grid(&coordinator, &["/a.jpg"]);
        coordinator
            .pairings()
            .store()
            .insert_raw("__VTNH_view_transition_b_a_", "[{broken");

        coordinator.on_navigation_complete(Some("b"));

        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert_eq!(coordinator.document().transition_name(&images[0]), None);
    }

    #[test]
    fn test_store_failure_is_swallowed() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg"]);
        coordinator.on_transition_start([TransitionRequest::new(images[0], "/a.jpg")]);
        let detail = render_detail(&coordinator, "/a.jpg");
        coordinator
            .pairings()
            .store()
            .set_failure(Some(StoreError::QuotaExceeded { key: "k".to_string() }));

        coordinator.on_navigation_complete(Some("page2"));

        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert!(coordinator.document().transition_name(&detail).is_some());
    }
}
