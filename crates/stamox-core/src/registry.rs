//! Name-keyed method registries
//!
//! A [`Registry`] maps method names to interchangeable implementations of
//! one operation (solvers, tests, estimators). Lookups of unknown names fail
//! with the full list of valid choices.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Immutable map from method name to implementation
#[derive(Debug, Clone)]
pub struct Registry<T> {
    kind: &'static str,
    entries: BTreeMap<&'static str, T>,
}

impl<T> Registry<T> {
    /// Build a registry of `kind` from named entries
    ///
    /// Fails on a repeated name.
    pub fn new(kind: &'static str, entries: impl IntoIterator<Item = (&'static str, T)>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (name, entry) in entries {
            if map.insert(name, entry).is_some() {
                return Err(Error::DuplicateMethod(name.to_string()));
            }
        }
        Ok(Self { kind, entries: map })
    }

    /// What this registry selects between, e.g. `"solver"`
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Look up an implementation by name
    pub fn get(&self, name: &str) -> Result<&T> {
        self.entries.get(name).ok_or_else(|| Error::UnknownMethod {
            requested: name.to_string(),
            valid: self.names().map(str::to_string).collect(),
        })
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered methods
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
