//! Access Order Module
//!
//! Keeps cache entries in recency order for promotion and tail eviction.

use std::collections::VecDeque;

use crate::cache::CacheEntry;

// == Access Order ==
/// Ordered entry sequence used by the cache.
///
/// Entries are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Eviction candidate
#[derive(Debug, Clone)]
pub struct AccessOrder<K, V> {
    entries: VecDeque<CacheEntry<K, V>>,
}

impl<K, V> Default for AccessOrder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> AccessOrder<K, V> {
    // == Constructor ==
    /// Creates a new empty sequence.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    // == Position ==
    /// Returns the index of the first entry whose key satisfies `matches`.
    pub fn position<F>(&self, mut matches: F) -> Option<usize>
    where
        F: FnMut(&K) -> bool,
    {
        self.entries.iter().position(|entry| matches(entry.key()))
    }

    /// Returns the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&CacheEntry<K, V>> {
        self.entries.get(index)
    }

    // == Promote ==
    /// Moves the entry at `index` to the front, shifting the ones before it back.
    ///
    /// Returns true if the entry actually moved.
    pub fn promote(&mut self, index: usize) -> bool {
        if index == 0 {
            return false;
        }
        match self.entries.remove(index) {
            Some(entry) => {
                self.entries.push_front(entry);
                true
            }
            None => false,
        }
    }

    /// Adds an entry at the back.
    pub fn push_back(&mut self, entry: CacheEntry<K, V>) {
        self.entries.push_back(entry);
    }

    /// Adds an entry at the front.
    pub fn push_front(&mut self, entry: CacheEntry<K, V>) {
        self.entries.push_front(entry);
    }

    // == Evict Tail ==
    /// Returns and removes the last entry.
    ///
    /// Returns None if the sequence is empty.
    pub fn evict_tail(&mut self) -> Option<CacheEntry<K, V>> {
        self.entries.pop_back()
    }

    // == Peek Tail ==
    /// Returns the last entry without removing it.
    pub fn peek_tail(&self) -> Option<&CacheEntry<K, V>> {
        self.entries.back()
    }

    // == Remove ==
    /// Removes the entry at `index`, keeping the relative order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<CacheEntry<K, V>> {
        self.entries.remove(index)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Length ==
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries front to back.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CacheEntry<K, V>> + '_ {
        self.entries.iter()
    }
}
