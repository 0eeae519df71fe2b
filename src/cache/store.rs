//! Cache Store Module
//!
//! Main cache engine: an ordered entry list matched by a caller-supplied key
//! predicate, with promote-on-hit and tail eviction.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use crate::cache::{AccessOrder, CacheEntry, CacheStats, HashIndex, KeyHasher, KeyPredicate};
use crate::config::{CacheConfig, SetPolicy, ShrinkPolicy};
use crate::error::{CacheError, Result};

// == Bounded Cache ==
/// Fixed-capacity key/value store ordered by recency.
///
/// Lookups scan the entries front to back with the key predicate and move a
/// matched entry to the front. A `set` that meets the capacity first evicts
/// the entry at the back.
///
/// Not synchronized: wrap it in a lock to share it across threads.
pub struct BoundedCache<K, V> {
    /// Entries, front = most recently used
    order: AccessOrder<K, V>,
    /// Key equality used for every comparison
    equals: KeyPredicate<K>,
    /// Optional hashed-key miss filter
    index: Option<HashIndex<K>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    set_policy: SetPolicy,
    shrink_policy: ShrinkPolicy,
}

impl<K, V> BoundedCache<K, V> {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries, matching keys with
    /// `predicate(stored_key, query_key)`.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new<F>(capacity: usize, predicate: F) -> Result<Self>
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        Self::builder().capacity(capacity).predicate(predicate).build()
    }

    /// Creates a cache that compares keys with `==`.
    pub fn with_eq(capacity: usize) -> Result<Self>
    where
        K: PartialEq + 'static,
    {
        Self::new(capacity, crate::cache::predicate::exact::<K>)
    }

    /// Creates a cache from a loaded [`CacheConfig`].
    pub fn from_config<F>(config: &CacheConfig, predicate: F) -> Result<Self>
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        Self::builder().config(config).predicate(predicate).build()
    }

    /// Starts a [`CacheBuilder`] with default settings.
    pub fn builder() -> CacheBuilder<K, V> {
        CacheBuilder::new()
    }

    // == Capacity ==
    /// Returns the current capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity.
    ///
    /// With `ShrinkPolicy::Deferred` a lower bound only takes effect on the
    /// next `set`. With `ShrinkPolicy::Immediate` tail entries are evicted now.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        let previous = std::mem::replace(&mut self.capacity, capacity);
        debug!("Cache capacity changed from {} to {}", previous, capacity);

        if self.order.len() > capacity {
            match self.shrink_policy {
                ShrinkPolicy::Immediate => self.trim_to(capacity),
                ShrinkPolicy::Deferred => warn!(
                    "Cache holds {} entries over capacity {} until the next set",
                    self.order.len(),
                    capacity
                ),
            }
        }

        Ok(())
    }

    // == Predicate ==
    /// Replaces the key predicate.
    ///
    /// Any installed key hasher is dropped, since it may disagree with the new
    /// predicate; install a matching one with [`BoundedCache::set_key_hasher`].
    pub fn set_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        self.equals = Box::new(predicate);
        if self.index.take().is_some() {
            debug!("Key predicate replaced, hash index dropped");
        }
    }

    /// Installs a key hasher for fast misses and indexes the current entries.
    ///
    /// Keys the predicate treats as equal must hash to the same value.
    pub fn set_key_hasher<H>(&mut self, hasher: H)
    where
        H: Fn(&K) -> u64 + 'static,
    {
        let mut index = HashIndex::new(Box::new(hasher));
        index.rebuild(self.order.iter().map(|entry| entry.key()));
        self.index = Some(index);
    }

    pub fn set_policy(&self) -> SetPolicy {
        self.set_policy
    }

    pub fn shrink_policy(&self) -> ShrinkPolicy {
        self.shrink_policy
    }

    // == Get ==
    /// Retrieves a value by key, moving its entry to the front.
    ///
    /// Returns `None` on a miss. A cached `None`-like value is still
    /// `Some(&value)`.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(position) = self.find(key) else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        if self.order.promote(position) {
            self.stats.record_promotion();
            trace!("Promoted cache entry from position {}", position);
        }

        self.order.get(0).map(|entry| entry.value())
    }

    /// Retrieves a value by key without reordering or touching stats.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.find(key)
            .and_then(|position| self.order.get(position))
            .map(|entry| entry.value())
    }

    /// Checks for a matching key without reordering.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    // == Set ==
    /// Stores a key/value pair.
    ///
    /// With `SetPolicy::Append` the entry goes to the back and earlier entries
    /// for the same key stay in place. With `SetPolicy::Replace` an existing
    /// entry for the key is dropped and the new one goes to the front.
    /// Either way, tail entries are evicted first while the cache is full.
    pub fn set(&mut self, key: K, value: V) {
        match self.set_policy {
            SetPolicy::Append => {
                self.make_room();
                self.track(&key);
                self.order.push_back(CacheEntry::new(key, value));
            }
            SetPolicy::Replace => {
                if let Some(position) = self.find(&key) {
                    self.take(position);
                }
                self.make_room();
                self.track(&key);
                self.order.push_front(CacheEntry::new(key, value));
            }
        }

        self.stats.set_total_entries(self.order.len());
    }

    // == Remove ==
    /// Removes the first entry matching `key` and returns its value.
    ///
    /// No-op returning `None` when nothing matches.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let position = self.find(key)?;
        self.take(position).map(CacheEntry::into_value)
    }

    // == Clear ==
    /// Drops every entry. Capacity, predicate and policies are kept.
    pub fn clear(&mut self) {
        let dropped = self.order.len();
        self.order.clear();
        if let Some(index) = self.index.as_mut() {
            index.clear();
        }
        self.stats.set_total_entries(0);
        debug!("Cache cleared, dropped {} entries", dropped);
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates key/value pairs front (most recent) to back.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|entry| (entry.key(), entry.value()))
    }

    /// Iterates keys front to back.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.order.iter().map(|entry| entry.key())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.order.len());
        stats
    }

    /// Zeroes the hit/miss/promotion/eviction counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::new();
        self.stats.set_total_entries(self.order.len());
    }

    fn find(&self, key: &K) -> Option<usize> {
        if let Some(index) = &self.index {
            if !index.may_contain(key) {
                return None;
            }
        }
        let equals = &self.equals;
        self.order.position(|stored| equals(stored, key))
    }

    fn take(&mut self, position: usize) -> Option<CacheEntry<K, V>> {
        let entry = self.order.remove(position)?;
        self.untrack(entry.key());
        self.stats.set_total_entries(self.order.len());
        Some(entry)
    }

    /// Evicts from the tail until one more entry fits.
    fn make_room(&mut self) {
        while self.order.len() >= self.capacity {
            if !self.evict_one() {
                break;
            }
        }
    }

    fn trim_to(&mut self, capacity: usize) {
        while self.order.len() > capacity {
            if !self.evict_one() {
                break;
            }
        }
    }

    fn evict_one(&mut self) -> bool {
        match self.order.evict_tail() {
            Some(entry) => {
                self.untrack(entry.key());
                self.stats.record_eviction();
                debug!(
                    "Evicted tail entry ({} left, capacity {})",
                    self.order.len(),
                    self.capacity
                );
                true
            }
            None => false,
        }
    }

    fn track(&mut self, key: &K) {
        if let Some(index) = self.index.as_mut() {
            index.insert(key);
        }
    }

    fn untrack(&mut self, key: &K) {
        if let Some(index) = self.index.as_mut() {
            index.remove(key);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("entries", &self.order)
            .field("capacity", &self.capacity)
            .field("set_policy", &self.set_policy)
            .field("shrink_policy", &self.shrink_policy)
            .field("index", &self.index)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

// == Cache Builder ==
/// Step-by-step construction of a [`BoundedCache`].
///
/// The predicate is mandatory; `build` fails without one.
pub struct CacheBuilder<K, V> {
    capacity: usize,
    predicate: Option<KeyPredicate<K>>,
    hasher: Option<KeyHasher<K>>,
    set_policy: SetPolicy,
    shrink_policy: ShrinkPolicy,
    _values: PhantomData<fn() -> V>,
}

impl<K, V> Default for CacheBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CacheBuilder<K, V> {
    pub fn new() -> Self {
        let defaults = CacheConfig::default();
        Self {
            capacity: defaults.capacity,
            predicate: None,
            hasher: None,
            set_policy: defaults.set_policy,
            shrink_policy: defaults.shrink_policy,
            _values: PhantomData,
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Enables the hashed-key miss filter.
    pub fn key_hasher<H>(mut self, hasher: H) -> Self
    where
        H: Fn(&K) -> u64 + 'static,
    {
        self.hasher = Some(Box::new(hasher));
        self
    }

    pub fn set_policy(mut self, policy: SetPolicy) -> Self {
        self.set_policy = policy;
        self
    }

    pub fn shrink_policy(mut self, policy: ShrinkPolicy) -> Self {
        self.shrink_policy = policy;
        self
    }

    /// Applies capacity and policies from `config`.
    pub fn config(self, config: &CacheConfig) -> Self {
        self.capacity(config.capacity)
            .set_policy(config.set_policy)
            .shrink_policy(config.shrink_policy)
    }

    /// Finishes the cache.
    ///
    /// # Errors
    /// - `CacheError::PredicateNotConfigured` if no predicate was given
    /// - `CacheError::InvalidCapacity` if the capacity is zero
    pub fn build(self) -> Result<BoundedCache<K, V>> {
        let equals = self.predicate.ok_or(CacheError::PredicateNotConfigured)?;
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }

        debug!(
            "Bounded cache created: capacity={}, set_policy={}, shrink_policy={}",
            self.capacity, self.set_policy, self.shrink_policy
        );

        Ok(BoundedCache {
            order: AccessOrder::new(),
            equals,
            index: self.hasher.map(HashIndex::new),
            stats: CacheStats::new(),
            capacity: self.capacity,
            set_policy: self.set_policy,
            shrink_policy: self.shrink_policy,
        })
    }
}
