//! Coordinator configuration

use serde::Deserialize;

use crate::error::ConfigError;

/// Default storage key prefix for persisted pairings
pub const DEFAULT_STORAGE_PREFIX: &str = "__VTNH_view_transition";

/// Navigation key assumed before the router has supplied one
pub const DEFAULT_INITIAL_KEY: &str = "initial";

/// Attribute matched on the arrival page when the caller names none
pub const DEFAULT_ATTRIBUTE: &str = "src";

/// Tag at which selector computation stops ascending
pub const DEFAULT_ROOT_TAG: &str = "BODY";

/// Configuration for a [`Coordinator`](crate::Coordinator).
///
/// Deserializes from the camelCase JSON the web boundary receives; every
/// field is optional and falls back to its default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoordinatorConfig {
    /// Prefix of every storage key written by the pairing store
    pub storage_prefix: String,
    /// Key used when the router supplies none
    pub initial_key: String,
    /// Attribute name used when a request does not name one
    pub default_attribute: String,
    /// Tag name bounding the selector walk (case-insensitive)
    pub root_tag: String,
    /// Keep at most this many navigation pairs, each stored in both
    /// directions; `None` never evicts
    pub max_pairings: Option<usize>,
    /// Release assigned names once the platform has captured the snapshot
    pub release_after_capture: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            initial_key: DEFAULT_INITIAL_KEY.to_string(),
            default_attribute: DEFAULT_ATTRIBUTE.to_string(),
            root_tag: DEFAULT_ROOT_TAG.to_string(),
            max_pairings: None,
            release_after_capture: false,
        }
    }
}

impl CoordinatorConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the coordinator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "storagePrefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.default_attribute.is_empty() {
            return Err(ConfigError::Invalid {
                field: "defaultAttribute",
                reason: "must not be empty".to_string(),
            });
        }
        if self.root_tag.is_empty() {
            return Err(ConfigError::Invalid {
                field: "rootTag",
                reason: "must not be empty".to_string(),
            });
        }
        if self.max_pairings == Some(0) {
            return Err(ConfigError::Invalid {
                field: "maxPairings",
                reason: "must be at least 1 (use null for no limit)".to_string(),
            });
        }
        Ok(())
    }
}
