//! Stored pairing encoding and retention

use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::error::PairingError;

/// One resolved entry of a stored pairing.
///
/// `transition_name` is the caller-supplied name and may be empty, in which
/// case readers derive the name from a selector at replay time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTransition {
    #[serde(default)]
    pub transition_name: String,
    #[serde(default)]
    pub from_selector: String,
}

impl StoredTransition {
    pub fn new(transition_name: impl Into<String>, from_selector: impl Into<String>) -> Self {
        Self {
            transition_name: transition_name.into(),
            from_selector: from_selector.into(),
        }
    }
}

/// Direction-keyed pairing persistence over a [`KeyValueStore`].
///
/// Keys follow `"<prefix>_<fromKey>_<toKey>_"`, values are JSON arrays of
/// [`StoredTransition`]. With a retention cap, a recency index of navigation
/// key pairs lives under `"<prefix>#index"`. The cap counts pairs, not
/// storage keys: (A → B) and (B → A) share one index entry and are evicted
/// together, so a kept pairing always keeps its reverse.
pub struct PairingStore<S> {
    store: S,
    prefix: String,
    max_pairings: Option<usize>,
}

impl<S: KeyValueStore> PairingStore<S> {
    pub fn new(store: S, prefix: impl Into<String>, max_pairings: Option<usize>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            max_pairings,
        }
    }

    /// Storage key for the (from → to) pairing.
    pub fn key(&self, from: &str, to: &str) -> String {
        format!("{}_{}_{}_", self.prefix, from, to)
    }

    fn index_key(&self) -> String {
        format!("{}#index", self.prefix)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the (from → to) pairing. Missing or `null` data is an empty list.
    pub fn load(&self, from: &str, to: &str) -> Result<Vec<StoredTransition>, PairingError> {
        let Some(raw) = self.store.get(&self.key(from, to))? else {
            return Ok(Vec::new());
        };
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        let entries: Option<Vec<StoredTransition>> = serde_json::from_str(&raw)?;
        Ok(entries.unwrap_or_default())
    }

    /// Write the (from → to) pairing, replacing any previous one.
    pub fn save(&self, from: &str, to: &str, entries: &[StoredTransition]) -> Result<(), PairingError> {
        self.store.set(&self.key(from, to), &serde_json::to_string(entries)?)?;
        if let Some(cap) = self.max_pairings {
            self.touch(from, to, cap)?;
        }
        Ok(())
    }

    /// Move the {from, to} pair to the most-recent end of the index and
    /// evict whole pairs past `cap`.
    fn touch(&self, from: &str, to: &str, cap: usize) -> Result<(), PairingError> {
        let pair = index_entry(from, to);
        let mut index = self.read_index()?;
        index.retain(|entry| *entry != pair);
        index.push(pair);

        let excess = index.len().saturating_sub(cap);
        for [a, b] in index.drain(..excess) {
            tracing::debug!(from = %a, to = %b, "evicting stored pairing");
            self.store.remove(&self.key(&a, &b))?;
            self.store.remove(&self.key(&b, &a))?;
        }

        self.store.set(&self.index_key(), &serde_json::to_string(&index)?)?;
        Ok(())
    }

    fn read_index(&self) -> Result<Vec<[String; 2]>, PairingError> {
        let Some(raw) = self.store.get(&self.index_key())? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(index) => Ok(index),
            Err(err) => {
                // Pairs listed in a corrupt index can't be evicted; start over.
                tracing::warn!(%err, "discarding malformed pairing index");
                Ok(Vec::new())
            }
        }
    }
}

/// Direction-independent index entry for the {from, to} pair.
fn index_entry(from: &str, to: &str) -> [String; 2] {
    if from <= to {
        [from.to_string(), to.to_string()]
    } else {
        [to.to_string(), from.to_string()]
    }
}
