//! Memoization tables for BDD operations.
//!
//! Every operation owns its own named [`Cache`]. Values are [`Ref`][crate::reference::Ref]s
//! or counters derived from them, so all engine-wide caches are cleared on garbage collection.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

/// A named cache backed by [HashMap], counting hits and misses.
pub struct Cache<K, V> {
    name: String,
    map: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> Cache<K, V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, 0)
    }

    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            map: HashMap::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Drop all entries. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            name: self.name.clone(),
            hits: self.hits,
            misses: self.misses,
            entries: self.map.len(),
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Look up a key, counting the access as a hit or a miss.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(v.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }
}

/// Snapshot of the counters of one cache.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CacheStats {
    pub name: String,
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups that were hits, or `0.0` if there were none.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Display for CacheStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: hits={}, misses={}, entries={}",
            self.name, self.hits, self.misses, self.entries
        )
    }
}
