//! Transition request and pending-state types

use crate::selector::derive_name;

/// A departure/arrival correlation supplied by the router integration when a
/// link is activated.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRequest<E> {
    /// Departing element; requests without one are dropped
    pub from_element: Option<E>,
    /// Explicit name; derived from the departure selector when absent
    pub transition_name: Option<String>,
    /// Attribute matched on arrival; the configured default when absent
    pub to_attribute_name: Option<String>,
    /// Attribute value identifying the arriving element
    pub to_attribute_value: String,
}

impl<E> TransitionRequest<E> {
    /// Request matching the arrival element whose default attribute equals `to_attribute_value`.
    pub fn new(from_element: E, to_attribute_value: impl Into<String>) -> Self {
        Self {
            from_element: Some(from_element),
            transition_name: None,
            to_attribute_name: None,
            to_attribute_value: to_attribute_value.into(),
        }
    }

    /// Use an explicit transition name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.transition_name = Some(name.into());
        self
    }

    /// Match on `attribute` instead of the default.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.to_attribute_name = Some(attribute.into());
        self
    }
}

/// A departure recorded at navigation start, consumed at completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTransition {
    /// Selector of the departing element
    pub from_selector: String,
    /// Caller-supplied name, empty when the name is derived
    pub transition_name: String,
    pub to_attribute_name: String,
    pub to_attribute_value: String,
}

impl PendingTransition {
    /// The name carried by both ends of this transition.
    pub fn effective_name(&self) -> String {
        if self.transition_name.is_empty() {
            derive_name(&self.from_selector)
        } else {
            self.transition_name.clone()
        }
    }
}

/// Coordinator lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No navigation in flight
    Idle,
    /// Start recorded departures that the next completion will resolve
    TransitionPending,
}
