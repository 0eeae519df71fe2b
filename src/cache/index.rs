//! Hash Index Module
//!
//! Optional negative-lookup filter over the predicate scan. Tracks how many
//! stored keys share each caller-computed hash, so a query whose hash is absent
//! can be answered as a miss without walking the entries.
//!
//! The hasher must agree with the cache predicate: keys the predicate treats
//! as equal must hash to the same value.

use std::collections::HashMap;

/// Caller-supplied key hash function.
pub type KeyHasher<K> = Box<dyn Fn(&K) -> u64>;

// == Hash Index ==
pub struct HashIndex<K> {
    hasher: KeyHasher<K>,
    counts: HashMap<u64, usize>,
}

impl<K> HashIndex<K> {
    // == Constructor ==
    /// Creates an empty index around `hasher`.
    pub fn new(hasher: KeyHasher<K>) -> Self {
        Self {
            hasher,
            counts: HashMap::new(),
        }
    }

    /// Records one more stored key.
    pub fn insert(&mut self, key: &K) {
        *self.counts.entry((self.hasher)(key)).or_insert(0) += 1;
    }

    /// Forgets one stored key.
    pub fn remove(&mut self, key: &K) {
        let hash = (self.hasher)(key);
        if let Some(count) = self.counts.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&hash);
            }
        }
    }

    /// Returns false only when no stored key can match `key`.
    pub fn may_contain(&self, key: &K) -> bool {
        self.counts.contains_key(&(self.hasher)(key))
    }

    /// Resets the index and records every key in `keys`.
    pub fn rebuild<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        self.counts.clear();
        for key in keys {
            self.insert(key);
        }
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Number of distinct hashes currently tracked.
    pub fn distinct_hashes(&self) -> usize {
        self.counts.len()
    }
}

impl<K> std::fmt::Debug for HashIndex<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashIndex")
            .field("distinct_hashes", &self.counts.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len_hasher() -> KeyHasher<String> {
        Box::new(|k: &String| k.len() as u64)
    }

    #[test]
    fn test_index_tracks_multiset() {
        let mut index = HashIndex::new(len_hasher());
        let a = "aa".to_string();
        let b = "bb".to_string();

        index.insert(&a);
        index.insert(&b);
        assert_eq!(index.distinct_hashes(), 1);

        index.remove(&a);
        // "bb" still shares the hash
        assert!(index.may_contain(&a));

        index.remove(&b);
        assert!(!index.may_contain(&a));
        assert_eq!(index.distinct_hashes(), 0);
    }

    #[test]
    fn test_index_remove_unknown_is_noop() {
        let mut index = HashIndex::new(len_hasher());
        index.remove(&"abc".to_string());
        assert_eq!(index.distinct_hashes(), 0);
    }

    #[test]
    fn test_index_rebuild_and_clear() {
        let mut index = HashIndex::new(len_hasher());
        let keys = vec!["a".to_string(), "bcd".to_string()];

        index.rebuild(keys.iter());
        assert!(index.may_contain(&"x".to_string()));
        assert!(index.may_contain(&"xyz".to_string()));
        assert!(!index.may_contain(&"xy".to_string()));

        index.clear();
        assert!(!index.may_contain(&"x".to_string()));
    }
}
