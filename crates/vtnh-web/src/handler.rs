//! `ViewTransitionHandler`, the object the router integration drives

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use vtnh_core::{Coordinator, CoordinatorConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::document::WebDocument;
use crate::logging::{init_logging, log};
use crate::request::parse_requests;
use crate::storage::SessionStore;

type WebCoordinator = Coordinator<WebDocument, SessionStore>;

/// One coordinator per router instance.
///
/// ```text
/// const handler = new ViewTransitionHandler();
/// link.onclick = () => handler.onTransitionStart({ fromElement: img, toAttributeValue: img.src });
/// router.afterEach((to) => handler.onNavigationComplete(to.key));
/// ```
#[wasm_bindgen]
pub struct ViewTransitionHandler {
    inner: Rc<RefCell<WebCoordinator>>,
}

#[wasm_bindgen]
impl ViewTransitionHandler {
    /// Create a handler with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ViewTransitionHandler, JsValue> {
        Self::create(CoordinatorConfig::default())
    }

    /// Create a handler from a JSON config, e.g.
    /// `{"storagePrefix":"app","defaultAttribute":"data-src"}`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<ViewTransitionHandler, JsValue> {
        let config = CoordinatorConfig::from_json(json)
            .map_err(|err| JsValue::from_str(&format!("invalid config: {}", err)))?;
        Self::create(config)
    }

    /// Link activation. Accepts one request object or an array of them.
    #[wasm_bindgen(js_name = onTransitionStart)]
    pub fn on_transition_start(&self, requests: &JsValue) {
        let requests = parse_requests(requests);
        if requests.is_empty() {
            log("[vtnh] onTransitionStart called without usable requests");
        }
        self.inner.borrow_mut().on_transition_start(requests);
    }

    /// Back/forward navigation towards `key` is about to swap the route.
    #[wasm_bindgen(js_name = onHistoryTransitionStart)]
    pub fn on_history_transition_start(&self, key: Option<String>) {
        self.inner
            .borrow_mut()
            .on_history_transition_start(key.as_deref());
    }

    /// The route for `key` has rendered.
    #[wasm_bindgen(js_name = onNavigationComplete)]
    pub fn on_navigation_complete(&self, key: Option<String>) {
        let release = {
            let mut coordinator = self.inner.borrow_mut();
            coordinator.on_navigation_complete(key.as_deref());
            coordinator.config().release_after_capture
        };
        if release {
            schedule_release(Rc::downgrade(&self.inner));
        }
    }

    /// The router aborted the navigation that `onTransitionStart` began.
    #[wasm_bindgen(js_name = onNavigationCancelled)]
    pub fn on_navigation_cancelled(&self) {
        self.inner.borrow_mut().on_navigation_cancelled();
    }

    /// Forget keys and pending departures and clear every assigned name.
    pub fn reset(&self) {
        self.inner.borrow_mut().reset();
    }

    #[wasm_bindgen(getter, js_name = currentKey)]
    pub fn current_key(&self) -> String {
        self.inner.borrow().current_key().to_string()
    }

    #[wasm_bindgen(getter, js_name = previousKey)]
    pub fn previous_key(&self) -> Option<String> {
        self.inner.borrow().previous_key().map(str::to_string)
    }

    #[wasm_bindgen(getter, js_name = isPending)]
    pub fn is_pending(&self) -> bool {
        !self.inner.borrow().pending().is_empty()
    }
}

impl ViewTransitionHandler {
    fn create(config: CoordinatorConfig) -> Result<ViewTransitionHandler, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        init_logging("warn");

        let document = WebDocument::from_window()
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let coordinator = Coordinator::new(document, SessionStore::new(), config);
        Ok(Self {
            inner: Rc::new(RefCell::new(coordinator)),
        })
    }
}

/// Release names on the next task, after the platform has captured the
/// new state. A handler freed in the meantime is skipped.
fn schedule_release(coordinator: Weak<RefCell<WebCoordinator>>) {
    let callback = Closure::once_into_js(move || {
        if let Some(coordinator) = coordinator.upgrade() {
            if let Ok(mut coordinator) = coordinator.try_borrow_mut() {
                coordinator.release_names();
            }
        }
    });

    let scheduled = web_sys::window().map(|window| {
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
    });
    if !matches!(scheduled, Some(Ok(_))) {
        tracing::warn!("could not schedule name release");
    }
}
