//! `sessionStorage` implementation of the key-value store

use vtnh_core::{KeyValueStore, StoreError};
use wasm_bindgen::{JsCast, JsValue};

/// Tab-scoped storage backing stored pairings.
///
/// Holds `None` when the browser denies `sessionStorage` (privacy modes,
/// sandboxed frames); every operation then fails with
/// [`StoreError::Unavailable`] and the coordinator degrades to no replay.
pub struct SessionStore {
    storage: Option<web_sys::Storage>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.session_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("sessionStorage unavailable; transitions will not replay on history navigation");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StoreError::Backend(describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(|err| {
            if is_quota_error(&err) {
                StoreError::QuotaExceeded { key: key.to_string() }
            } else {
                StoreError::Backend(describe(&err))
            }
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StoreError::Backend(describe(&err)))
    }
}

fn is_quota_error(err: &JsValue) -> bool {
    err.dyn_ref::<web_sys::DomException>()
        .map(|exception| exception.name() == "QuotaExceededError")
        .unwrap_or(false)
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(err: &JsValue) -> String {
    if let Some(exception) = err.dyn_ref::<web_sys::DomException>() {
        return format!("{}: {}", exception.name(), exception.message());
    }
    err.as_string()
        .or_else(|| js_sys::JSON::stringify(err).ok().and_then(|s| s.as_string()))
        .unwrap_or_else(|| format!("{:?}", err))
}
