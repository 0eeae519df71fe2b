//! Cache Entry Module
//!
//! Defines the immutable key/value pair stored by the cache.

// == Cache Entry ==
/// A single cached key/value pair.
///
/// Entries are never mutated in place; an update replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    key: K,
    value: V,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the stored key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry, returning its key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Consumes the entry, returning its value.
    pub fn into_value(self) -> V {
        self.value
    }
}
