//! Bounded LRU cache for memoizing repeated search results.
//!
//! Independent of the index internals; callers front the engine with it to
//! absorb the cost of repeated fuzzy scans. Recency order lives in a
//! `VecDeque`, oldest first. At autocomplete capacities the O(n) promotion
//! scan is irrelevant, so no intrusive list is needed.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use tracing::debug;

pub struct LruCache<K, V> {
    capacity: usize,
    map: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries. A capacity of
    /// zero is clamped to one: a zero-slot cache would evict on every
    /// `set` and never hold anything.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Look up a key, promoting it to most-recently-used on a hit. A miss
    /// changes nothing.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.map.contains_key(key) {
            return None;
        }
        self.touch(key);
        self.map.get(key)
    }

    /// Insert or replace. Re-setting an existing key promotes it; a fresh
    /// insert at capacity evicts the least-recently-used entry first.
    pub fn set(&mut self, key: K, value: V) {
        if self.map.contains_key(&key) {
            self.touch(&key);
            self.map.insert(key, value);
            return;
        }
        if self.map.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                debug!("evicting least-recently-used cache entry");
                self.map.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.map.insert(key, value);
    }

    /// Membership test. Does not touch recency order.
    pub fn has(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    pub fn delete(&mut self, key: &K) -> Option<V> {
        let removed = self.map.remove(key);
        if removed.is_some() {
            self.order.retain(|k| k != key);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_without_intervening_get() {
        let mut cache = LruCache::new(3);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);
        cache.set("d", 4);
        assert!(!cache.has(&"a"));
        assert!(cache.has(&"b"));
        assert!(cache.has(&"c"));
        assert!(cache.has(&"d"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_get_protects_from_eviction() {
        let mut cache = LruCache::new(3);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);
        assert_eq!(cache.get(&"a"), Some(&1));
        cache.set("d", 4);
        // "a" was promoted, so "b" is now the oldest.
        assert!(cache.has(&"a"));
        assert!(!cache.has(&"b"));
    }

    #[test]
    fn test_has_does_not_promote() {
        let mut cache = LruCache::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        assert!(cache.has(&"a"));
        cache.set("c", 3);
        // has() must not have protected "a".
        assert!(!cache.has(&"a"));
        assert!(cache.has(&"b"));
    }

    #[test]
    fn test_reset_promotes_and_replaces() {
        let mut cache = LruCache::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 10);
        cache.set("c", 3);
        assert_eq!(cache.get(&"a"), Some(&10));
        assert!(!cache.has(&"b"));
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut cache = LruCache::new(2);
        cache.set("a", 1);
        assert_eq!(cache.get(&"zzz"), None);
        cache.set("b", 2);
        cache.set("c", 3);
        assert!(!cache.has(&"a"));
        assert!(cache.has(&"b"));
    }

    #[test]
    fn test_zero_capacity_clamps_to_one() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.set("a", 1);
        assert_eq!(cache.get(&"a"), Some(&1));
        cache.set("b", 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.has(&"b"));
        assert!(!cache.has(&"a"));
    }

    #[test]
    fn test_delete_and_clear() {
        let mut cache = LruCache::new(3);
        cache.set("a", 1);
        cache.set("b", 2);
        assert_eq!(cache.delete(&"a"), Some(1));
        assert_eq!(cache.delete(&"a"), None);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
