//! Suppsearch - typo-tolerant prefix search for supplement-name autocomplete.
//!
//! A character trie over normalized names handles exact-prefix lookups; a
//! Levenshtein fallback with a length-dependent edit budget fills in when
//! exact matches run short. The index is purely in-memory and rebuilt from
//! an external reference source, with the first page loaded synchronously
//! and the rest paged in by a background task.

pub mod cache;
pub mod index;
pub mod interface;
pub mod normalize;
pub mod ranking;
mod store;
mod trie;

pub use cache::LruCache;
pub use index::SearchIndex;
pub use interface::*;
pub use store::{StoreConfig, SupplementStore};
