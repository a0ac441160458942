//! Persistence for resolved pairings
//!
//! - [`KeyValueStore`]: synchronous string store, `sessionStorage` in the browser
//! - [`PairingStore`]: key layout, JSON encoding and retention on top of it

mod pairing;

pub use pairing::{PairingStore, StoredTransition};

use crate::error::StoreError;

/// Synchronous, tab-local string storage.
pub trait KeyValueStore {
    /// Read a value. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
