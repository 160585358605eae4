//! Suppsearch Interface Definition
//!
//! Source of truth for the shared types: the reference record, the
//! data-source contract, and the error enum.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Anything the index can store. The engine keeps the record as an opaque
/// payload and reads only its display name.
pub trait Named {
    fn name(&self) -> &str;
}

/// A reference-vocabulary record supplied by the data-access layer.
///
/// `name` is the display form; the index key is its normalized form and
/// lives only inside the trie and corpus map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

impl ReferenceItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            id: None,
        }
    }
}

impl Named for ReferenceItem {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Error type for suppsearch operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Data source error: {0}")]
    Source(String),
}

/// Offset/limit paging over the reference table.
///
/// The reload lifecycle stops paging when a returned page is shorter than
/// `page_size`.
#[async_trait::async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch_page(
        &self,
        offset: u64,
        page_size: u64,
    ) -> Result<Vec<ReferenceItem>, SearchError>;
}
