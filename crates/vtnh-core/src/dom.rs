//! DOM surface consumed by the engine
//!
//! The engine never touches a browser type directly. `vtnh-web` implements
//! [`Document`] over `web_sys`, and [`testing::MemoryDocument`] implements it
//! over an in-memory tree so every rule can be exercised natively.
//!
//! [`testing::MemoryDocument`]: crate::testing::MemoryDocument

use std::fmt::Debug;

/// Read/write access to the parts of a document the engine needs.
///
/// Methods take `&self`: a document is a shared handle and the style
/// mutations go through it, the same way `web_sys` element handles work.
pub trait Document {
    /// Handle to one element. Cloning a handle does not clone the element.
    type Element: Clone + PartialEq + Debug;

    /// Upper- or lower-case tag name of the element.
    fn tag_name(&self, element: &Self::Element) -> String;

    /// The element's `id`, or `None` when absent or empty.
    fn id(&self, element: &Self::Element) -> Option<String>;

    /// Parent element, `None` at the document root.
    fn parent_element(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Previous sibling that is an element.
    fn previous_element_sibling(&self, element: &Self::Element) -> Option<Self::Element>;

    /// First element matching a selector produced by
    /// [`compute_selector`](crate::selector::compute_selector). Unparseable
    /// selectors are a miss.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// First element whose attribute `name` equals `value` exactly.
    fn find_by_attribute(&self, name: &str, value: &str) -> Option<Self::Element>;

    /// First element whose inline view-transition name equals `name`.
    fn find_by_transition_name(&self, name: &str) -> Option<Self::Element>;

    /// The element's inline view-transition name, `None` when unset or empty.
    fn transition_name(&self, element: &Self::Element) -> Option<String>;

    /// Set the inline view-transition name. An empty `name` clears it.
    fn set_transition_name(&self, element: &Self::Element, name: &str);
}
