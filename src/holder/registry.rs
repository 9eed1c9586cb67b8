//! Registry of known holders
//!
//! Backed by a persistent map, so cloning a registry shares its nodes and
//! costs O(1).

use crate::holder::holder::{Holder, HolderError};
use im::OrdMap;

/// All registered holders, keyed by full name
#[derive(Clone, Debug, Default)]
pub struct HolderRegistry {
    holders: OrdMap<String, Holder>,
}

impl HolderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            holders: OrdMap::new(),
        }
    }

    /// Register a holder
    ///
    /// Returns `Ok(true)` if the holder was added and `Ok(false)` if it was
    /// already registered. Re-registration never replaces the stored record.
    pub fn register(&mut self, name: &str) -> Result<bool, HolderError> {
        if self.holders.contains_key(name) {
            return Ok(false);
        }

        let holder = Holder::new(name)?;
        self.holders.insert(holder.full_name.clone(), holder);

        log::info!("Holder registered: {}", name);
        Ok(true)
    }

    /// Insert an already validated holder record
    ///
    /// Returns `false` if a holder with that name was already present.
    pub(crate) fn insert(&mut self, holder: Holder) -> bool {
        if self.holders.contains_key(holder.full_name()) {
            return false;
        }
        self.holders.insert(holder.full_name.clone(), holder);
        true
    }

    /// Check whether a holder is registered
    pub fn exists(&self, name: &str) -> bool {
        self.holders.contains_key(name)
    }

    /// Get a holder by name
    pub fn get(&self, name: &str) -> Option<&Holder> {
        self.holders.get(name)
    }

    /// Iterate over holders in name order
    pub fn iter(&self) -> impl Iterator<Item = &Holder> {
        self.holders.values()
    }

    /// Registered holder names, sorted
    pub fn names(&self) -> Vec<String> {
        self.holders.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// Whether both registries point at the same map root
    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Self) -> bool {
        self.holders.ptr_eq(&other.holders)
    }
}
