use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{ResolveError, ResolveResult};

/// Map keyed by package name where every key can be written exactly once.
///
/// A second write means the same node of the dependency graph was resolved
/// twice, which is a resolver bug. The write is rejected and the first value kept.
#[derive(Debug)]
pub struct InsertOnceCache<V> {
    entries: HashMap<String, V>,
}

impl<V> InsertOnceCache<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, package: &str) -> Option<&V> {
        self.entries.get(package)
    }

    pub fn insert(&mut self, package: &str, value: V) -> ResolveResult<&V> {
        match self.entries.entry(package.to_string()) {
            Entry::Occupied(_) => Err(ResolveError::CacheOverwrite {
                package: package.to_string(),
            }),
            Entry::Vacant(slot) => Ok(slot.insert(value)),
        }
    }
}

impl<V> Default for InsertOnceCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
