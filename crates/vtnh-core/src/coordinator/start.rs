//! Navigation start and cancellation

use super::{Coordinator, PendingTransition, TransitionRequest};
use crate::dom::Document;
use crate::selector::compute_selector;
use crate::storage::KeyValueStore;

impl<D: Document, S: KeyValueStore> Coordinator<D, S> {
    /// Name the departing elements and record them for the next completion.
    ///
    /// Replaces any pending set left by an earlier start. Every name still
    /// on the page (an earlier start, a history replay) is released first, so
    /// only the new departures carry names.
    pub fn on_transition_start<I>(&mut self, requests: I)
    where
        I: IntoIterator<Item = TransitionRequest<D::Element>>,
    {
        self.discard_pending();

        for request in requests {
            let Some(element) = request.from_element else {
                continue;
            };
            let to_attribute_name = request
                .to_attribute_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.config.default_attribute.clone());
            let entry = PendingTransition {
                from_selector: compute_selector(&self.document, &element, &self.config.root_tag),
                transition_name: request.transition_name.unwrap_or_default(),
                to_attribute_name,
                to_attribute_value: request.to_attribute_value,
            };

            self.registry
                .assign(&self.document, Some(&element), &entry.effective_name());
            self.pending.push(entry);
        }

        tracing::debug!(
            key = %self.current_key,
            pending = self.pending.len(),
            "transition started"
        );
    }

    /// Drop the pending set of a navigation that will never complete.
    pub fn on_navigation_cancelled(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(pending = self.pending.len(), "navigation cancelled");
        }
        self.discard_pending();
    }

    fn discard_pending(&mut self) {
        self.pending.clear();
        self.registry.release_all(&self.document);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::coordinator::CoordinatorState;

    #[test]
    fn test_start_names_departure_by_id() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg"]);
        coordinator.document().set_id(images[0], "hero");

        coordinator.on_transition_start([TransitionRequest::new(images[0], "/a.jpg")]);

        assert_eq!(coordinator.state(), CoordinatorState::TransitionPending);
        let pending = &coordinator.pending()[0];
        assert_eq!(pending.from_selector, "#hero");
        assert_eq!(pending.to_attribute_name, "src");
        assert_eq!(
            coordinator.document().transition_name(&images[0]).as_deref(),
            Some("hero")
        );
    }

    #[test]
    fn test_start_derives_positional_name() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg"]);

        coordinator.on_transition_start([TransitionRequest::new(images[1], "/b.jpg")]);

        assert_eq!(coordinator.pending()[0].from_selector, "MAIN:nth-child(1)>IMG:nth-child(2)");
        assert_eq!(
            coordinator.document().transition_name(&images[1]).as_deref(),
            Some("MAINnthchild1IMGnthchild2")
        );
    }

    #[test]
    fn test_start_explicit_name_and_attribute() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg"]);

        coordinator.on_transition_start([TransitionRequest::new(images[0], "/a.jpg")
            .with_name("transition-video")
            .with_attribute("data-src")]);

        let pending = &coordinator.pending()[0];
        assert_eq!(pending.transition_name, "transition-video");
        assert_eq!(pending.to_attribute_name, "data-src");
        assert_eq!(
            coordinator.document().transition_name(&images[0]).as_deref(),
            Some("transition-video")
        );
    }

    #[test]
    fn test_start_empty_attribute_name_uses_default() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg"]);

        coordinator.on_transition_start([TransitionRequest::new(images[0], "/a.jpg").with_attribute("")]);

        assert_eq!(coordinator.pending()[0].to_attribute_name, "src");
    }

    #[test]
    fn test_start_skips_missing_element() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg"]);

        coordinator.on_transition_start([
            TransitionRequest {
                from_element: None,
                transition_name: Some("title".to_string()),
                to_attribute_name: None,
                to_attribute_value: "/a.jpg".to_string(),
            },
            TransitionRequest::new(images[0], "/a.jpg"),
        ]);

        assert_eq!(coordinator.pending().len(), 1);
        assert!(coordinator.registry().holder("title").is_none());
    }

    #[test]
    fn test_start_with_nothing_stays_idle() {
        let mut coordinator = create_test_coordinator();
        coordinator.on_transition_start(Vec::new());
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
    }

    #[test]
    fn test_second_start_replaces_first() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg"]);

        coordinator.on_transition_start([TransitionRequest::new(images[0], "/a.jpg")]);
        coordinator.on_transition_start([TransitionRequest::new(images[1], "/b.jpg")]);

        assert_eq!(coordinator.pending().len(), 1);
        assert_eq!(coordinator.pending()[0].to_attribute_value, "/b.jpg");
        assert_eq!(coordinator.document().transition_name(&images[0]), None);
        assert!(coordinator.document().transition_name(&images[1]).is_some());
    }

    #[test]
    fn test_start_after_back_names_only_new_departure() {
        let mut coordinator = create_test_coordinator();
        coordinator.on_navigation_complete(Some("grid"));
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg"]);
        coordinator.on_transition_start([TransitionRequest::new(images[0], "/a.jpg")]);
        render_detail(&coordinator, "/a.jpg");
        coordinator.on_navigation_complete(Some("detail"));

        // Back to the grid: the replay names the first image.
        let images = render_grid(&coordinator, &["/a.jpg", "/b.jpg"]);
        coordinator.on_navigation_complete(Some("grid"));
        assert!(coordinator.document().transition_name(&images[0]).is_some());

        coordinator.on_transition_start([TransitionRequest::new(images[1], "/b.jpg")]);

        let doc = coordinator.document();
        let named: Vec<_> = doc
            .all_elements()
            .into_iter()
            .filter(|el| doc.transition_name(el).is_some())
            .collect();
        assert_eq!(named, vec![images[1]]);
        assert_eq!(coordinator.registry().len(), 1);
    }

    #[test]
    fn test_cancel_releases_and_idles() {
        let mut coordinator = create_test_coordinator();
        let images = render_grid(&coordinator, &["/a.jpg"]);

        coordinator.on_transition_start([TransitionRequest::new(images[0], "/a.jpg")]);
        coordinator.on_navigation_cancelled();

        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert_eq!(coordinator.document().transition_name(&images[0]), None);
        assert_eq!(coordinator.current_key(), "initial");
        assert_eq!(coordinator.previous_key(), None);
    }
}
