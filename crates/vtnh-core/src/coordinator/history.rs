//! Back/forward navigation start

use super::{stored_or_derived, Coordinator};
use crate::dom::Document;
use crate::selector::resolve_selector;
use crate::storage::KeyValueStore;

impl<D: Document, S: KeyValueStore> Coordinator<D, S> {
    /// Pre-name the outgoing element before a back/forward route swap.
    ///
    /// Entry `i` of the (current → target) pairing is named after entry `i`
    /// of (target → current), so the outgoing element receives the same name
    /// its counterpart will get when the navigation completes. Entries
    /// without a counterpart are skipped. Names left from earlier navigations
    /// are released first. State and keys are unchanged.
    pub fn on_history_transition_start(&mut self, target: Option<&str>) {
        let target = self.key_or_initial(target);
        let outgoing = self.load_or_empty(&self.current_key, &target);
        let counterparts = self.load_or_empty(&target, &self.current_key);

        tracing::debug!(
            from = %self.current_key,
            to = %target,
            entries = outgoing.len(),
            "history transition started"
        );

        self.registry.release_all(&self.document);
        for (entry, counterpart) in outgoing.iter().zip(&counterparts) {
            if entry.from_selector.is_empty() || counterpart.from_selector.is_empty() {
                continue;
            }
            let name = stored_or_derived(entry, &counterpart.from_selector);
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
    use crate::storage::StoredTransition;

    /// grid → detail forward, leaving the coordinator on the detail page.
    fn navigate_to_detail(coordinator: &mut TestCoordinator) {
        coordinator.on_navigation_complete(Some("grid"));
        let images = render_grid(coordinator, &["/a.jpg", "/b.jpg", "/c.jpg"]);
        coordinator.on_transition_start([TransitionRequest::new(images[2], "/c.jpg")]);
        render_detail(coordinator, "/c.jpg");
        coordinator.on_navigation_complete(Some("detail"));
    }

    #[test]
    fn test_back_pre_names_outgoing_with_departure_name() {
        let mut coordinator = create_test_coordinator();
        navigate_to_detail(&mut coordinator);
        let detail = coordinator
            .document()
            .query_selector("ARTICLE:nth-child(1)>IMG:nth-child(2)")
            .unwrap();
        coordinator.release_names();

        coordinator.on_history_transition_start(Some("grid"));

        // Named after the grid-side selector, matching what completion will assign.
        assert_eq!(
            coordinator.document().transition_name(&detail).as_deref(),
            Some("MAINnthchild1IMGnthchild3")
        );
        assert_eq!(coordinator.current_key(), "detail");
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
    }

    #[test]
    fn test_back_then_complete_names_agree() {
        let mut coordinator = create_test_coordinator();
        navigate_to_detail(&mut coordinator);

        coordinator.on_history_transition_start(Some("grid"));
        let outgoing_name = coordinator.registry().names().next().unwrap().to_string();
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg", "/c.jpg"]);
        coordinator.on_navigation_complete(Some("grid"));

        assert_eq!(
            coordinator.document().transition_name(&images[2]).as_deref(),
            Some(outgoing_name.as_str())
        );
    }

    #[test]
    fn test_forward_again_uses_arrival_selector_name() {
        let mut coordinator = create_test_coordinator();
        navigate_to_detail(&mut coordinator);
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg", "/c.jpg"]);
        coordinator.on_navigation_complete(Some("grid"));
        coordinator.release_names();

        coordinator.on_history_transition_start(Some("detail"));

        assert_eq!(
            coordinator.document().transition_name(&images[2]).as_deref(),
            Some("ARTICLEnthchild1IMGnthchild2")
        );
    }

    #[test]
    fn test_explicit_name_replayed() {
        let mut coordinator = create_test_coordinator();
        coordinator.on_navigation_complete(Some("grid"));
        let images = render_grid(&coordinator, &["/a.jpg"]);
        coordinator.on_transition_start([TransitionRequest::new(images[0], "/a.jpg").with_name("hero")]);
        let detail = render_detail(&coordinator, "/a.jpg");
        coordinator.on_navigation_complete(Some("detail"));
        coordinator.release_names();

        coordinator.on_history_transition_start(Some("grid"));

        assert_eq!(
            coordinator.document().transition_name(&detail).as_deref(),
            Some("hero")
        );
    }

    #[test]
    fn test_without_counterpart_nothing_is_named() {
        let mut coordinator = create_test_coordinator();
        coordinator.on_navigation_complete(Some("detail"));
        render_detail(&coordinator, "/a.jpg");
        coordinator
            .pairings()
            .save(
                "detail",
                "grid",
                &[StoredTransition::new("", "ARTICLE:nth-child(1)>IMG:nth-child(2)")],
            )
            .unwrap();

        coordinator.on_history_transition_start(Some("grid"));

        assert!(coordinator.registry().is_empty());
    }

    #[test]
    fn test_history_start_releases_stale_names() {
        let mut coordinator = create_test_coordinator();
        navigate_to_detail(&mut coordinator);
        let detail = coordinator
            .document()
            .query_selector("ARTICLE:nth-child(1)>IMG:nth-child(2)")
            .unwrap();
        let doc = coordinator.document();
        let extra = doc.append(doc.body(), "img");
        coordinator.registry.assign(&coordinator.document, Some(&extra), "stale");

        coordinator.on_history_transition_start(Some("grid"));

        assert_eq!(coordinator.document().transition_name(&extra), None);
        assert!(coordinator.document().transition_name(&detail).is_some());
        assert_eq!(coordinator.registry().len(), 1);
    }

    #[test]
    fn test_unknown_target_is_noop() {
        let mut coordinator = create_test_coordinator();
        navigate_to_detail(&mut coordinator);
        coordinator.release_names();
        let writes = coordinator.document().style_writes();

        coordinator.on_history_transition_start(Some("elsewhere"));
        coordinator.on_history_transition_start(None);

        assert_eq!(coordinator.document().style_writes(), writes);
    }
}
