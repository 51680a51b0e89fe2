//! Vector store provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::StoredDocument;

/// Trait for named-collection storage with nearest-neighbor text search
///
/// Implementations:
/// - `ChromaStore`: Chroma server over HTTP, embeddings computed client-side
/// - in-memory fakes in tests
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Delete the collection if it exists, then create it empty.
    ///
    /// Collections have a drop-and-recreate lifecycle: there is no
    /// incremental update and no partial-state guarantee if ingestion dies
    /// mid-run.
    async fn recreate_collection(&self, name: &str) -> Result<()>;

    /// Insert documents into a collection
    async fn add(&self, collection: &str, documents: &[StoredDocument]) -> Result<()>;

    /// Return the texts of the `top_k` nearest documents to the query
    async fn query(&self, collection: &str, text: &str, top_k: usize) -> Result<Vec<String>>;

    /// Number of documents in a collection
    async fn count(&self, collection: &str) -> Result<usize>;

    /// Check whether the store is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
