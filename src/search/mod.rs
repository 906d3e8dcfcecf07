// file: src/search/mod.rs
// description: search index abstraction and OpenSearch implementation exports
// reference: internal module structure

pub mod opensearch;

pub use self::opensearch::OpenSearchIndex;

use crate::error::Result;
use crate::models::SearchDocument;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Acknowledgement returned by the search engine for a created record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReceipt {
    pub index: String,
    pub document_id: String,
    pub result: String,
}

/// Write access to the search index.
///
/// Every call to `index_document` creates a new record with an
/// engine-generated identifier; there is no update or merge.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn index_document(&self, document: &SearchDocument) -> Result<IndexReceipt>;

    /// `Ok(false)` when the cluster answers but reports itself unavailable.
    async fn health_check(&self) -> Result<bool>;
}
