//! Navigation coordinator
//!
//! A two-state machine driven by the router integration:
//!
//! - `start`: `on_transition_start` names departures and records them,
//!   `on_navigation_cancelled` drops them
//! - `complete`: `on_navigation_complete` resolves arrivals (forward) or
//!   replays a stored pairing (history), then returns to idle
//! - `history`: `on_history_transition_start` pre-names the outgoing
//!   element of a back/forward navigation from the stored pairing
//!
//! All state lives on the [`Coordinator`] value, so independent router
//! instances never share keys or pending sets.

mod complete;
mod history;
mod start;
mod transition;

pub use transition::{CoordinatorState, PendingTransition, TransitionRequest};

use crate::config::CoordinatorConfig;
use crate::dom::Document;
use crate::registry::NameRegistry;
use crate::selector::derive_name;
use crate::storage::{KeyValueStore, PairingStore, StoredTransition};

/// Transition-name coordinator for one browsing context.
pub struct Coordinator<D: Document, S> {
    document: D,
    registry: NameRegistry<D::Element>,
    pairings: PairingStore<S>,
    config: CoordinatorConfig,
    current_key: String,
    previous_key: Option<String>,
    pending: Vec<PendingTransition>,
}

impl<D: Document, S: KeyValueStore> Coordinator<D, S> {
    /// Create an idle coordinator positioned at the configured initial key.
    pub fn new(document: D, store: S, config: CoordinatorConfig) -> Self {
        let pairings = PairingStore::new(store, config.storage_prefix.clone(), config.max_pairings);
        Self {
            document,
            registry: NameRegistry::new(),
            pairings,
            current_key: config.initial_key.clone(),
            previous_key: None,
            pending: Vec::new(),
            config,
        }
    }

    /// Return to the freshly constructed state. Stored pairings are kept.
    pub fn reset(&mut self) {
        self.registry.release_all(&self.document);
        self.pending.clear();
        self.current_key = self.config.initial_key.clone();
        self.previous_key = None;
    }

    /// Release every name this coordinator assigned.
    ///
    /// Meant to run after the platform has captured its snapshot, from a
    /// zero-delay deferred callback.
    pub fn release_names(&mut self) {
        self.registry.release_all(&self.document);
    }

    pub fn state(&self) -> CoordinatorState {
        if self.pending.is_empty() {
            CoordinatorState::Idle
        } else {
            CoordinatorState::TransitionPending
        }
    }

    pub fn current_key(&self) -> &str {
        &self.current_key
    }

    pub fn previous_key(&self) -> Option<&str> {
        self.previous_key.as_deref()
    }

    pub fn pending(&self) -> &[PendingTransition] {
        &self.pending
    }

    pub fn registry(&self) -> &NameRegistry<D::Element> {
        &self.registry
    }

    pub fn pairings(&self) -> &PairingStore<S> {
        &self.pairings
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    fn key_or_initial(&self, key: Option<&str>) -> String {
        key.map(str::to_string)
            .unwrap_or_else(|| self.config.initial_key.clone())
    }

    /// Read a pairing, treating unreadable data as no pairing.
    fn load_or_empty(&self, from: &str, to: &str) -> Vec<StoredTransition> {
        match self.pairings.load(from, to) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(from, to, %err, "ignoring unreadable stored pairing");
                Vec::new()
            }
        }
    }

    fn persist(&self, from: &str, to: &str, entries: &[StoredTransition]) {
        if let Err(err) = self.pairings.save(from, to, entries) {
            tracing::warn!(from, to, %err, "failed to store pairing");
        }
    }
}

/// Stored name, else the name derived from `fallback_selector`.
fn stored_or_derived(entry: &StoredTransition, fallback_selector: &str) -> String {
    if entry.transition_name.is_empty() {
        derive_name(fallback_selector)
    } else {
        entry.transition_name.clone()
    }
}
