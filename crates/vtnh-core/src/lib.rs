//! View-transition name coordination for client-side routing
//!
//! When a router swaps pages, the browser can morph an element on the old
//! page into its counterpart on the new one, provided both carry the same
//! `view-transition-name` at capture time. This crate decides which
//! elements carry which name, without the caller listing pairs up front:
//!
//! 1. On link activation the departing element is named and remembered.
//! 2. When the route has rendered, the arriving element is found by an
//!    attribute match (`src` by default) and given the same name.
//! 3. The resolved pairing is stored in both directions, so a later
//!    back/forward navigation can re-apply the names symmetrically.
//!
//! ## Module Structure
//!
//! - [`selector`]: re-locatable element selectors and name derivation
//! - [`registry`]: exclusive name ownership (at most one holder per name)
//! - [`coordinator`]: the navigation state machine and its entry points
//! - [`storage`]: pairing persistence over a key-value store
//! - [`dom`]: the document surface the engine consumes
//! - [`testing`]: in-memory document and store
//!
//! ## Example
//!
//! ```rust
//! use vtnh_core::testing::{MemoryDocument, MemoryStore};
//! use vtnh_core::{Coordinator, CoordinatorConfig, Document, TransitionRequest};
//!
//! let mut coordinator =
//!     Coordinator::new(MemoryDocument::new(), MemoryStore::new(), CoordinatorConfig::default());
//!
//! let doc = coordinator.document();
//! let thumb = doc.append(doc.body(), "img");
//! doc.set_id(thumb, "hero");
//!
//! coordinator.on_transition_start([TransitionRequest::new(thumb, "/photo2.jpg")]);
//!
//! let doc = coordinator.document();
//! doc.clear_children(doc.body());
//! let full = doc.append(doc.body(), "img");
//! doc.set_attribute(full, "src", "/photo2.jpg");
//!
//! coordinator.on_navigation_complete(Some("page2"));
//! assert_eq!(coordinator.document().transition_name(&full).as_deref(), Some("hero"));
//! ```

pub mod config;
pub mod coordinator;
pub mod dom;
pub mod error;
pub mod registry;
pub mod selector;
pub mod storage;
pub mod testing;

pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, CoordinatorState, PendingTransition, TransitionRequest};
pub use dom::Document;
pub use error::{ConfigError, PairingError, SelectorError, StoreError};
pub use registry::NameRegistry;
pub use selector::{compute_selector, derive_name, resolve_selector};
pub use storage::{KeyValueStore, PairingStore, StoredTransition};
