//! Security policy: which identifiers, keywords and built-ins guest code may use.
//!
//! A [`Policy`] is immutable and cheap to clone. Start from
//! [`Policy::default`], the strictest configuration, call
//! [`Policy::to_builder`] to get an independent [`PolicyBuilder`], adjust it
//! fluently and [`PolicyBuilder::seal`] it into a new policy:
//!
//! ```
//! use warden::{IdentifierSet, Keyword, Policy};
//!
//! let policy = Policy::default()
//!     .to_builder()
//!     .name("plugins")
//!     .enable_keyword(Keyword::Import)
//!     .reserved_identifier_prefix("$")
//!     .add_identifier(IdentifierSet::Reserved, "$host")
//!     .seal();
//! assert!(policy.is_keyword_enabled(Keyword::Import));
//! assert!(Policy::default().identifiers(IdentifierSet::Reserved).is_empty());
//! ```

mod config;
mod defaults;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::keyword::Keyword;
use crate::listener::ListenerKind;

pub use config::{ConfigError, PolicyConfig};
pub use defaults::{
    DEFAULT_BUILT_IN_OBJECTS, DEFAULT_DISALLOWED_IDENTIFIERS, DEFAULT_GLOBAL_IDENTIFIER,
    DEFAULT_POLICY_NAME, DEFAULT_RESERVED_FUNCTION_IDENTIFIERS,
    DEFAULT_TO_BE_DELETED_IDENTIFIERS, DEFAULT_TO_BE_FROZEN_IDENTIFIERS,
};

/// Predicate deciding whether a name follows the reserved naming convention.
pub type ReservedIdentifierMatcher = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// The identifier sets a policy carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IdentifierSet {
    /// Runtime globals that may be read but never rebound.
    BuiltInObject,
    /// Identifiers that may not appear at all.
    Disallowed,
    /// Reserved-convention names that may be referenced.
    Reserved,
    /// Reserved-convention names that may also be rebound.
    ReservedMutable,
    /// Reserved-convention function names a module may declare; these are
    /// also the functions a module must declare.
    ReservedFunction,
    /// Globals the host deletes before execution.
    ToBeDeleted,
    /// Globals the host freezes before execution, in freezing order.
    ToBeFrozen,
}

impl IdentifierSet {
    /// Every identifier set.
    pub const ALL: [Self; 7] = [
        Self::BuiltInObject,
        Self::Disallowed,
        Self::Reserved,
        Self::ReservedMutable,
        Self::ReservedFunction,
        Self::ToBeDeleted,
        Self::ToBeFrozen,
    ];
}

/// Names in insertion order with constant-time membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierList {
    names: Vec<String>,
    lookup: HashSet<String>,
}

impl IdentifierList {
    fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for name in names {
            list.insert(name.into());
        }
        list
    }

    fn insert(&mut self, name: String) {
        if self.lookup.insert(name.clone()) {
            self.names.push(name);
        }
    }

    fn remove(&mut self, name: &str) {
        if self.lookup.remove(name) {
            self.names.retain(|existing| existing != name);
        }
    }

    fn clear(&mut self) {
        self.names.clear();
        self.lookup.clear();
    }

    /// Returns `true` when `name` is in the list.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    /// Iterates the names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when the list holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Clone)]
struct PolicyData {
    name: String,
    built_in_objects: IdentifierList,
    disallowed: IdentifierList,
    reserved: IdentifierList,
    reserved_mutable: IdentifierList,
    reserved_functions: IdentifierList,
    to_be_deleted: IdentifierList,
    to_be_frozen: IdentifierList,
    enabled_keywords: BTreeSet<Keyword>,
    reserved_matcher: ReservedIdentifierMatcher,
    global_identifier: String,
    listener: ListenerKind,
    arguments: BTreeMap<String, serde_json::Value>,
}

impl PolicyData {
    fn strictest() -> Self {
        Self {
            name: DEFAULT_POLICY_NAME.to_owned(),
            built_in_objects: IdentifierList::from_names(DEFAULT_BUILT_IN_OBJECTS.iter().copied()),
            disallowed: IdentifierList::from_names(DEFAULT_DISALLOWED_IDENTIFIERS.iter().copied()),
            reserved: IdentifierList::default(),
            reserved_mutable: IdentifierList::default(),
            reserved_functions: IdentifierList::from_names(
                DEFAULT_RESERVED_FUNCTION_IDENTIFIERS.iter().copied(),
            ),
            to_be_deleted: IdentifierList::from_names(
                DEFAULT_TO_BE_DELETED_IDENTIFIERS.iter().copied(),
            ),
            to_be_frozen: IdentifierList::from_names(
                DEFAULT_TO_BE_FROZEN_IDENTIFIERS.iter().copied(),
            ),
            enabled_keywords: BTreeSet::new(),
            reserved_matcher: Arc::new(|_: &str| false),
            global_identifier: DEFAULT_GLOBAL_IDENTIFIER.to_owned(),
            listener: ListenerKind::default(),
            arguments: BTreeMap::new(),
        }
    }

    const fn list(&self, set: IdentifierSet) -> &IdentifierList {
        match set {
            IdentifierSet::BuiltInObject => &self.built_in_objects,
            IdentifierSet::Disallowed => &self.disallowed,
            IdentifierSet::Reserved => &self.reserved,
            IdentifierSet::ReservedMutable => &self.reserved_mutable,
            IdentifierSet::ReservedFunction => &self.reserved_functions,
            IdentifierSet::ToBeDeleted => &self.to_be_deleted,
            IdentifierSet::ToBeFrozen => &self.to_be_frozen,
        }
    }

    const fn list_mut(&mut self, set: IdentifierSet) -> &mut IdentifierList {
        match set {
            IdentifierSet::BuiltInObject => &mut self.built_in_objects,
            IdentifierSet::Disallowed => &mut self.disallowed,
            IdentifierSet::Reserved => &mut self.reserved,
            IdentifierSet::ReservedMutable => &mut self.reserved_mutable,
            IdentifierSet::ReservedFunction => &mut self.reserved_functions,
            IdentifierSet::ToBeDeleted => &mut self.to_be_deleted,
            IdentifierSet::ToBeFrozen => &mut self.to_be_frozen,
        }
    }
}

/// A sealed, read-only security policy.
///
/// Cloning shares the underlying data.
#[derive(Clone)]
pub struct Policy {
    data: Arc<PolicyData>,
}

impl Default for Policy {
    /// Returns the strictest policy: every keyword disabled, the full
    /// built-in and disallowed lists, no reserved names and `main` as the
    /// required module function.
    fn default() -> Self {
        static DEFAULT: OnceLock<Policy> = OnceLock::new();
        DEFAULT
            .get_or_init(|| PolicyBuilder::new().seal())
            .clone()
    }
}

impl Policy {
    /// Returns an independent builder initialised from this policy.
    pub fn to_builder(&self) -> PolicyBuilder {
        PolicyBuilder {
            data: PolicyData::clone(&self.data),
        }
    }

    /// Returns the policy's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Returns the names in `set`.
    #[must_use]
    pub fn identifiers(&self, set: IdentifierSet) -> &IdentifierList {
        self.data.list(set)
    }

    /// Returns `true` when `name` is in `set`.
    #[must_use]
    pub fn contains(&self, set: IdentifierSet, name: &str) -> bool {
        self.data.list(set).contains(name)
    }

    /// Returns `true` when `name` follows the reserved naming convention.
    #[must_use]
    pub fn is_reserved(&self, name: &str) -> bool {
        (self.data.reserved_matcher)(name)
    }

    /// Returns `true` when `keyword` is permitted.
    #[must_use]
    pub fn is_keyword_enabled(&self, keyword: Keyword) -> bool {
        self.data.enabled_keywords.contains(&keyword)
    }

    /// Returns the permitted keywords.
    pub fn enabled_keywords(&self) -> impl Iterator<Item = Keyword> + '_ {
        self.data.enabled_keywords.iter().copied()
    }

    /// Returns the name of the global object.
    #[must_use]
    pub fn global_identifier(&self) -> &str {
        &self.data.global_identifier
    }

    /// Returns the listener applied during checks.
    #[must_use]
    pub fn listener(&self) -> ListenerKind {
        self.data.listener
    }

    /// Returns the extension argument stored under `key`.
    #[must_use]
    pub fn argument(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.arguments.get(key)
    }

    /// Returns all extension arguments.
    #[must_use]
    pub fn arguments(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.data.arguments
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("name", &self.data.name)
            .field("enabled_keywords", &self.data.enabled_keywords)
            .field("global_identifier", &self.data.global_identifier)
            .field("listener", &self.data.listener)
            .field("arguments", &self.data.arguments)
            .finish_non_exhaustive()
    }
}

/// Mutable builder consumed into a [`Policy`] by [`PolicyBuilder::seal`].
#[derive(Clone)]
#[must_use]
pub struct PolicyBuilder {
    data: PolicyData,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBuilder {
    /// Creates a builder holding the strictest configuration.
    pub fn new() -> Self {
        Self {
            data: PolicyData::strictest(),
        }
    }

    /// Sets the policy's name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.data.name = name.into();
        self
    }

    /// Replaces the contents of `set`.
    pub fn with_identifiers<I, S>(mut self, set: IdentifierSet, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.data.list_mut(set) = IdentifierList::from_names(names);
        self
    }

    /// Adds `name` to `set`.
    pub fn add_identifier(mut self, set: IdentifierSet, name: impl Into<String>) -> Self {
        self.data.list_mut(set).insert(name.into());
        self
    }

    /// Removes `name` from `set`.
    pub fn remove_identifier(mut self, set: IdentifierSet, name: &str) -> Self {
        self.data.list_mut(set).remove(name);
        self
    }

    /// Empties `set`.
    pub fn clear_identifiers(mut self, set: IdentifierSet) -> Self {
        self.data.list_mut(set).clear();
        self
    }

    /// Permits or forbids `keyword`.
    pub fn set_keyword_enabled(mut self, keyword: Keyword, enabled: bool) -> Self {
        if enabled {
            self.data.enabled_keywords.insert(keyword);
        } else {
            self.data.enabled_keywords.remove(&keyword);
        }
        self
    }

    /// Permits `keyword`.
    pub fn enable_keyword(self, keyword: Keyword) -> Self {
        self.set_keyword_enabled(keyword, true)
    }

    /// Sets the reserved naming convention.
    pub fn reserved_identifier_matcher<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.data.reserved_matcher = Arc::new(matcher);
        self
    }

    /// Treats every name starting with `prefix` as reserved.
    pub fn reserved_identifier_prefix(self, prefix: impl Into<String>) -> Self {
        let owned: String = prefix.into();
        self.reserved_identifier_matcher(move |name| name.starts_with(owned.as_str()))
    }

    /// Sets the name of the global object.
    pub fn global_identifier(mut self, name: impl Into<String>) -> Self {
        self.data.global_identifier = name.into();
        self
    }

    /// Selects the listener applied during checks.
    pub fn listener(mut self, listener: ListenerKind) -> Self {
        self.data.listener = listener;
        self
    }

    /// Stores an extension argument.
    pub fn argument(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.arguments.insert(key.into(), value);
        self
    }

    /// Freezes the builder into a [`Policy`].
    #[must_use]
    pub fn seal(self) -> Policy {
        Policy {
            data: Arc::new(self.data),
        }
    }
}

impl fmt::Debug for PolicyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyBuilder")
            .field("name", &self.data.name)
            .finish_non_exhaustive()
    }
}
