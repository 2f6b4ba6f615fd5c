//! JSON policy configuration files.
//!
//! A [`PolicyConfig`] mirrors the [`PolicyBuilder`] surface. Every field is
//! optional; anything left out keeps the strictest default.
//!
//! ```json
//! {
//!   "name": "plugins",
//!   "enabled_keywords": ["import", "async"],
//!   "reserved_identifier_prefix": "$",
//!   "reserved_identifiers": ["$host"],
//!   "listener": "security_check"
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{IdentifierSet, Policy, PolicyBuilder};
use crate::error::SanitizerError;
use crate::keyword::Keyword;
use crate::listener::ListenerKind;

/// Errors raised while loading a policy configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read policy configuration {path}: {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The configuration is not valid JSON for a [`PolicyConfig`].
    #[error("invalid policy configuration: {source}")]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: Arc<serde_json::Error>,
    },
}

/// Serializable description of a [`Policy`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Policy name.
    pub name: Option<String>,
    /// Replacement for the built-in object list.
    pub built_in_objects: Option<Vec<String>>,
    /// Replacement for the disallowed identifier list.
    pub disallowed_identifiers: Option<Vec<String>>,
    /// Replacement for the reserved identifier list.
    pub reserved_identifiers: Option<Vec<String>>,
    /// Replacement for the reserved mutable identifier list.
    pub reserved_mutable_identifiers: Option<Vec<String>>,
    /// Replacement for the reserved function identifier list.
    pub reserved_function_identifiers: Option<Vec<String>>,
    /// Replacement for the to-be-deleted list.
    pub to_be_deleted_identifiers: Option<Vec<String>>,
    /// Replacement for the to-be-frozen list.
    pub to_be_frozen_identifiers: Option<Vec<String>>,
    /// Prefix marking reserved identifiers.
    pub reserved_identifier_prefix: Option<String>,
    /// Keywords to permit.
    pub enabled_keywords: Vec<Keyword>,
    /// Name of the global object.
    pub global_identifier: Option<String>,
    /// Listener name, e.g. `security_check` or `syntax_only`.
    pub listener: Option<String>,
    /// Free-form extension arguments.
    pub arguments: BTreeMap<String, serde_json::Value>,
}

impl PolicyConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::Parse {
            source: Arc::new(err),
        })
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            source: Arc::new(err),
        })?;
        Self::from_json_str(&json)
    }

    /// Builds the described policy on top of the strictest defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`SanitizerError`] with kind
    /// [`crate::ErrorKind::ListenerConstructionFailure`] when the listener
    /// name is not recognised.
    pub fn into_policy(self) -> Result<Policy, SanitizerError> {
        let listener = self
            .listener
            .as_deref()
            .map(|name| {
                name.parse::<ListenerKind>()
                    .map_err(|_| SanitizerError::listener_construction_failure(name))
            })
            .transpose()?;

        let mut builder = PolicyBuilder::new();
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        for (set, names) in [
            (IdentifierSet::BuiltInObject, self.built_in_objects),
            (IdentifierSet::Disallowed, self.disallowed_identifiers),
            (IdentifierSet::Reserved, self.reserved_identifiers),
            (IdentifierSet::ReservedMutable, self.reserved_mutable_identifiers),
            (IdentifierSet::ReservedFunction, self.reserved_function_identifiers),
            (IdentifierSet::ToBeDeleted, self.to_be_deleted_identifiers),
            (IdentifierSet::ToBeFrozen, self.to_be_frozen_identifiers),
        ] {
            if let Some(list) = names {
                builder = builder.with_identifiers(set, list);
            }
        }
        if let Some(prefix) = self.reserved_identifier_prefix {
            builder = builder.reserved_identifier_prefix(prefix);
        }
        for keyword in self.enabled_keywords {
            builder = builder.enable_keyword(keyword);
        }
        if let Some(global) = self.global_identifier {
            builder = builder.global_identifier(global);
        }
        if let Some(kind) = listener {
            builder = builder.listener(kind);
        }
        for (key, value) in self.arguments {
            builder = builder.argument(key, value);
        }
        Ok(builder.seal())
    }
}
