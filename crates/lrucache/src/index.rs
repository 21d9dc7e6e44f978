//! Key index: key -> position in the recency list

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

use crate::list::Locator;

/// O(1) mapping from key to [`Locator`]
///
/// Holds positions only; entries are owned by the recency list.
pub struct KeyIndex<K> {
    map: HashMap<K, Locator, RandomState>,
}

impl<K: Hash + Eq> KeyIndex<K> {
    /// Create an empty index
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty index with room for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Locator for `key`, if indexed
    pub fn find<Q>(&self, key: &Q) -> Option<Locator>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Index `key` at `loc`, returning the locator it replaced
    pub fn insert(&mut self, key: K, loc: Locator) -> Option<Locator> {
        self.map.insert(key, loc)
    }

    /// Drop `key` from the index, returning its locator
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Locator>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Check if `key` is indexed
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every key
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterate over `(key, locator)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&K, Locator)> + '_ {
        self.map.iter().map(|(key, loc)| (key, *loc))
    }
}

impl<K: Hash + Eq> Default for KeyIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
