//! LruCache: key index + recency list behind one façade
//!
//! Every operation consults the key index first and then edits the recency
//! list directly through the returned locator, so no operation scans.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::index::KeyIndex;
use crate::list::{Locator, RecencyList};
use crate::stats::CacheStats;

/// Fixed-capacity cache with least-recently-used eviction
///
/// `put`, `get`, `exists` and `erase` are O(1) amortized. After every public
/// call the index and the list hold the same keys, at most `capacity` of them.
pub struct LruCache<K, V> {
    /// Entries, most recently used first
    list: RecencyList<(K, V)>,

    /// Key -> position in `list`
    index: KeyIndex<K>,

    /// Maximum number of resident entries
    capacity: usize,

    /// Cache statistics
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self, K> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        debug!(capacity, "created LRU cache");

        Ok(Self {
            list: RecencyList::with_capacity(capacity.saturating_add(1)),
            index: KeyIndex::with_capacity(capacity.saturating_add(1)),
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Insert or replace `key`, making it the most recently used entry
    ///
    /// A replaced entry is dropped and re-inserted at the head. If the cache
    /// grows past capacity, the least recently used entry is evicted.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(loc) = self.index.remove(&key) {
            self.list.remove(loc);
            self.stats.record_update();
        } else {
            self.stats.record_insert();
        }

        let loc = self.list.push_front((key.clone(), value));
        self.index.insert(key, loc);

        if self.list.len() > self.capacity {
            self.evict();
        }
    }

    /// Look up `key` and promote it to most recently used
    ///
    /// # Errors
    /// * `Error::NotFound` carrying `key` if it is not resident
    pub fn get(&mut self, key: &K) -> Result<&V, K> {
        match self.promote(key) {
            Some(loc) => self
                .list
                .get(loc)
                .map(|(_, value)| value)
                .ok_or_else(|| Error::NotFound(key.clone())),
            None => Err(Error::NotFound(key.clone())),
        }
    }

    /// Like [`get`](Self::get), but hands out the value mutably
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, K> {
        match self.promote(key) {
            Some(loc) => self
                .list
                .get_mut(loc)
                .map(|(_, value)| value)
                .ok_or_else(|| Error::NotFound(key.clone())),
            None => Err(Error::NotFound(key.clone())),
        }
    }

    /// Remove `key` from the cache
    ///
    /// # Errors
    /// * `Error::NotFound` carrying `key` if it is not resident
    pub fn erase(&mut self, key: &K) -> Result<(), K> {
        match self.remove(key) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(key.clone())),
        }
    }

    /// Remove `key` and return its value, if resident
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let loc = self.index.remove(key)?;
        let (_, value) = self.list.remove(loc)?;
        self.stats.record_removal();
        Some(value)
    }

    /// Check if `key` is resident without touching recency order
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Check if `key` is resident and promote it if so
    ///
    /// Returns the entry's locator alongside the flag, so the value can be
    /// read with [`value_at`](Self::value_at) without a second lookup.
    /// A miss yields `(false, Locator::NONE)`.
    pub fn exists_promote<Q>(&mut self, key: &Q) -> (bool, Locator)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.promote(key) {
            Some(loc) => (true, loc),
            None => (false, Locator::NONE),
        }
    }

    /// Non-failing alternative to [`get`](Self::get)
    pub fn get_if_exists<Q>(&mut self, key: &Q) -> (bool, Locator)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.exists_promote(key)
    }

    /// Entry behind a locator from [`exists_promote`](Self::exists_promote)
    ///
    /// Returns `None` for `Locator::NONE` or a locator whose entry has since
    /// been erased or evicted.
    pub fn entry_at(&self, loc: Locator) -> Option<(&K, &V)> {
        self.list.get(loc).map(|(key, value)| (key, value))
    }

    /// Value behind a locator, see [`entry_at`](Self::entry_at)
    pub fn value_at(&self, loc: Locator) -> Option<&V> {
        self.list.get(loc).map(|(_, value)| value)
    }

    /// Read `key` without promoting it
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let loc = self.index.find(key)?;
        self.value_at(loc)
    }

    /// Least recently used entry, next in line for eviction
    pub fn lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(key, value)| (key, value))
    }

    /// Most recently used entry
    pub fn mru(&self) -> Option<(&K, &V)> {
        self.list.front().map(|(key, value)| (key, value))
    }

    /// Iterate from most to least recently used without promoting
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.list.iter().map(|(key, value)| (key, value))
    }

    /// Current number of resident entries
    pub fn size(&self) -> usize {
        self.index.len()
    }

    /// Same as [`size`](Self::size)
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry (statistics are kept)
    pub fn clear(&mut self) {
        debug!(dropped = self.list.len(), "cleared LRU cache");
        self.index.clear();
        self.list.clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero all statistics counters
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    #[cfg(any(test, debug_assertions))]
    /// Panics if the index and the list disagree or capacity is exceeded.
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.index.len(), self.list.len(), "index/list size mismatch");
        assert!(self.list.len() <= self.capacity, "capacity exceeded");

        for (key, loc) in self.index.iter() {
            match self.list.get(loc) {
                Some((entry_key, _)) => assert!(entry_key == key, "locator points at another key"),
                None => panic!("dangling locator in key index"),
            }
        }
    }

    fn promote<Q>(&mut self, key: &Q) -> Option<Locator>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        // Slots never move, so the indexed locator stays valid after the splice
        let promoted = self
            .index
            .find(key)
            .and_then(|loc| self.list.move_to_front(loc));

        match promoted {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        promoted
    }

    fn evict(&mut self) {
        if let Some((key, _)) = self.list.pop_back() {
            self.index.remove(&key);
            self.stats.record_eviction();
            trace!(
                capacity = self.capacity,
                size = self.list.len(),
                "evicted least recently used entry"
            );
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
