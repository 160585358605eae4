//! Character trie over normalized keys.
//!
//! Each node owns its children; nodes are created lazily on insert and
//! never removed individually — the whole trie is dropped and rebuilt on
//! `clear()`/reload. Payloads are `Arc`-shared with the corpus map so a
//! terminal node and the map entry point at the same record.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

#[derive(Debug)]
pub(crate) struct TrieNode<R> {
    children: HashMap<char, TrieNode<R>>,
    is_end_of_word: bool,
    data: Option<Arc<R>>,
}

impl<R> Default for TrieNode<R> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            is_end_of_word: false,
            data: None,
        }
    }
}

impl<R> TrieNode<R> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert an already-normalized key. An empty key is a warned no-op,
    /// not a failure. Re-inserting a key overwrites its payload.
    pub(crate) fn insert(&mut self, word: &str, data: Arc<R>) {
        if word.is_empty() {
            warn!("ignoring empty trie key");
            return;
        }
        let mut node = self;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.is_end_of_word = true;
        node.data = Some(data);
    }

    /// Exact-prefix descent. `None` means no stored key extends `prefix`;
    /// the caller falls back to fuzzy matching.
    pub(crate) fn walk(&self, prefix: &str) -> Option<&TrieNode<R>> {
        let mut node = self;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Depth-first collection of `(key, payload)` at terminal nodes under
    /// this node, stopping once `limit` results are gathered. Sibling
    /// order is whatever the hash map yields; no ordering is guaranteed.
    pub(crate) fn collect(&self, prefix: &str, limit: usize, out: &mut Vec<(String, Arc<R>)>) {
        if out.len() >= limit {
            return;
        }
        if self.is_end_of_word {
            if let Some(data) = &self.data {
                out.push((prefix.to_owned(), Arc::clone(data)));
            }
        }
        for (ch, child) in &self.children {
            if out.len() >= limit {
                break;
            }
            let mut next = String::with_capacity(prefix.len() + ch.len_utf8());
            next.push_str(prefix);
            next.push(*ch);
            child.collect(&next, limit, out);
        }
    }
}
