//! SearchIndex - trie plus fuzzy corpus, kept in lockstep.
//!
//! The trie answers exact-prefix walks; the `items` map is the fuzzy-match
//! corpus and the size/enumeration source of truth. `insert` and `clear`
//! are the only operations that touch either, and they touch both.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use crate::interface::Named;
use crate::normalize::normalize;
use crate::ranking::fuzzy_rank;
use crate::trie::TrieNode;

/// Default result cap when the caller does not pass one.
pub const DEFAULT_SEARCH_LIMIT: usize = 4;

pub struct SearchIndex<R> {
    root: TrieNode<R>,
    items: HashMap<String, Arc<R>>,
}

impl<R> Default for SearchIndex<R> {
    fn default() -> Self {
        Self {
            root: TrieNode::new(),
            items: HashMap::new(),
        }
    }
}

impl<R: Named> SearchIndex<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under the normalized form of `word`. Re-inserting
    /// the same normalized key overwrites the stored record.
    pub fn insert(&mut self, word: &str, data: R) {
        let key = normalize(word);
        if key.is_empty() {
            warn!(word, "skipping record whose name normalizes to empty");
            return;
        }
        let data = Arc::new(data);
        self.root.insert(&key, Arc::clone(&data));
        self.items.insert(key, data);
    }

    /// Bulk load. Records whose name normalizes to empty are skipped with
    /// a warning; a partial batch never aborts the load.
    pub fn load_items(&mut self, records: impl IntoIterator<Item = R>) {
        for record in records {
            let name = record.name().to_owned();
            self.insert(&name, record);
        }
    }

    /// Prefix search with a fuzzy fallback.
    ///
    /// Exact-prefix matches come first, collected from the trie up to
    /// `limit`. If that leaves the result set under the limit, every
    /// stored key is scored by edit distance against the normalized query
    /// and survivors within the length-dependent budget fill the
    /// remaining slots, ranked by (distance, key). Keys the exact pass
    /// already produced are never appended twice.
    pub fn search(&self, prefix: &str, limit: usize) -> Vec<Arc<R>> {
        if prefix.is_empty() || limit == 0 {
            return Vec::new();
        }
        let query = normalize(prefix);
        if query.is_empty() {
            // Whitespace-only input; a vacuous root walk would return
            // arbitrary entries, which is useless for autocomplete.
            return Vec::new();
        }

        let mut exact: Vec<(String, Arc<R>)> = Vec::new();
        if let Some(node) = self.root.walk(&query) {
            node.collect(&query, limit, &mut exact);
        }

        let seen: HashSet<String> = exact.iter().map(|(key, _)| key.clone()).collect();
        let mut results: Vec<Arc<R>> = exact.into_iter().map(|(_, record)| record).collect();

        if results.len() < limit {
            let keys: Vec<&str> = self.items.keys().map(String::as_str).collect();
            for (key, _dist) in fuzzy_rank(&query, &keys) {
                if results.len() >= limit {
                    break;
                }
                if seen.contains(key) {
                    continue;
                }
                if let Some(record) = self.items.get(key) {
                    results.push(Arc::clone(record));
                }
            }
        }

        results
    }

    /// [`search`](Self::search) with the default result cap.
    pub fn suggest(&self, prefix: &str) -> Vec<Arc<R>> {
        self.search(prefix, DEFAULT_SEARCH_LIMIT)
    }

    /// Drop the whole structure; used before a full rebuild.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.items.clear();
    }

    pub fn all_items(&self) -> Vec<Arc<R>> {
        self.items.values().map(Arc::clone).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
