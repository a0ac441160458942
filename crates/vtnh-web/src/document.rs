//! `web_sys` implementation of the engine's document surface

use vtnh_core::selector::attribute_selector;
use vtnh_core::Document;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Inline style property the platform reads at capture time
pub const VIEW_TRANSITION_NAME: &str = "view-transition-name";

/// Elements whose inline style mentions a transition name at all
const NAMED_ELEMENTS: &str = "[style*=\"view-transition-name\"]";

/// The page's `document`, seen through [`Document`].
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The current window's document, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }
}

impl Document for WebDocument {
    type Element = Element;

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name()
    }

    fn id(&self, element: &Element) -> Option<String> {
        let id = element.id();
        (!id.is_empty()).then_some(id)
    }

    fn parent_element(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn previous_element_sibling(&self, element: &Element) -> Option<Element> {
        element.previous_element_sibling()
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(_) => {
                // Ids from the page are not always valid CSS identifiers.
                tracing::debug!(selector, "selector rejected by the browser");
                None
            }
        }
    }

    fn find_by_attribute(&self, name: &str, value: &str) -> Option<Element> {
        self.query_selector(&attribute_selector(name, value))
    }

    fn find_by_transition_name(&self, name: &str) -> Option<Element> {
        let candidates = self.document.query_selector_all(NAMED_ELEMENTS).ok()?;
        (0..candidates.length())
            .filter_map(|i| candidates.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .find(|element| self.transition_name(element).as_deref() == Some(name))
    }

    fn transition_name(&self, element: &Element) -> Option<String> {
        let style = element.dyn_ref::<HtmlElement>()?.style();
        let value = style.get_property_value(VIEW_TRANSITION_NAME).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_transition_name(&self, element: &Element, name: &str) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            tracing::debug!(tag = %element.tag_name(), "element has no inline style");
            return;
        };
        let style = html.style();
        let result = if name.is_empty() {
            style.remove_property(VIEW_TRANSITION_NAME).map(|_| ())
        } else {
            style.set_property(VIEW_TRANSITION_NAME, name)
        };
        if result.is_err() {
            tracing::warn!(name, "failed to write view-transition-name");
        }
    }
}
