//! Reading transition requests from JS values
//!
//! The router integration passes plain objects:
//!
//! ```text
//! { fromElement, transitionName?, toAttributeName?, toAttributeValue }
//! ```
//!
//! either as an array or a single object. The earlier field names
//! `element`, `attributeName` and `attributeValue` are still accepted.

use js_sys::{Array, Reflect};
use vtnh_core::TransitionRequest;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

/// Parse every usable request. Non-objects are skipped.
pub fn parse_requests(value: &JsValue) -> Vec<TransitionRequest<Element>> {
    if Array::is_array(value) {
        Array::from(value)
            .iter()
            .filter_map(|entry| parse_request(&entry))
            .collect()
    } else {
        parse_request(value).into_iter().collect()
    }
}

/// Parse one request object.
pub fn parse_request(value: &JsValue) -> Option<TransitionRequest<Element>> {
    if !value.is_object() {
        return None;
    }

    let from_element = field(value, "fromElement")
        .or_else(|| field(value, "element"))
        .and_then(|el| el.dyn_into::<Element>().ok());
    let to_attribute_name =
        string_field(value, "toAttributeName").or_else(|| string_field(value, "attributeName"));
    let to_attribute_value = string_field(value, "toAttributeValue")
        .or_else(|| string_field(value, "attributeValue"))
        .unwrap_or_default();

    Some(TransitionRequest {
        from_element,
        transition_name: string_field(value, "transitionName").filter(|name| !name.is_empty()),
        to_attribute_name,
        to_attribute_value,
    })
}

/// A present, non-null field.
fn field(object: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(object, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn string_field(object: &JsValue, name: &str) -> Option<String> {
    field(object, name).and_then(|value| value.as_string())
}
