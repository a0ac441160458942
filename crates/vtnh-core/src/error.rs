//! Error types for the coordination engine.
//!
//! None of these reach the router integration through the navigation entry
//! points: a failed lookup or unreadable pairing degrades to "no transition".
//! They exist so the internal layers can propagate with `?` and the
//! coordinator can log the cause before dropping it.

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore) backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store is not reachable (no window, storage disabled).
    #[error("storage unavailable")]
    Unavailable,

    /// The backend refused the write because it is full.
    #[error("storage quota exceeded writing {key}")]
    QuotaExceeded {
        /// Key that was being written
        key: String,
    },

    /// Any other backend failure, carried as text.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors reading or writing a stored pairing.
#[derive(Debug, thiserror::Error)]
pub enum PairingError {
    /// The store itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored value is not a valid pairing list.
    #[error("malformed pairing data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors parsing an element selector.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// Empty selector, or an empty step between two `>` separators.
    #[error("empty selector step at position {0}")]
    EmptyStep(usize),

    /// A step that is neither `#id` nor `TAG:nth-child(n)`.
    #[error("unsupported selector step: {0}")]
    Unsupported(String),

    /// `nth-child` index that is not a positive integer.
    #[error("invalid nth-child index in {0}")]
    InvalidIndex(String),
}

/// Errors loading a [`CoordinatorConfig`](crate::config::CoordinatorConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config JSON could not be parsed.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but holds an unusable value.
    #[error("invalid config field {field}: {reason}")]
    Invalid {
        /// Offending field (camelCase, as written by the caller)
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}
