//! Collection loading with a drop-and-recreate lifecycle

use crate::error::Result;
use crate::providers::VectorStoreProvider;
use crate::types::StoredDocument;

/// Loads `(text, metadata)` pairs into a named collection, rebuilding the
/// collection from scratch each run.
pub struct CollectionLoader<'a> {
    store: &'a dyn VectorStoreProvider,
}

impl<'a> CollectionLoader<'a> {
    /// Create a loader over a vector store
    pub fn new(store: &'a dyn VectorStoreProvider) -> Self {
        Self { store }
    }

    /// Delete the collection if present, recreate it, and insert every pair
    /// with a freshly generated id. Any insert failure aborts the run; a
    /// crash mid-load leaves the collection partially populated.
    pub async fn load(
        &self,
        collection: &str,
        pairs: Vec<(String, serde_json::Value)>,
    ) -> Result<usize> {
        self.store.recreate_collection(collection).await?;
        tracing::info!("Recreated collection '{}'", collection);

        let count = pairs.len();
        for (text, metadata) in pairs {
            let document = StoredDocument::new(text, metadata);
            self.store.add(collection, &[document]).await?;
        }

        tracing::info!("Stored {} documents in '{}'", count, collection);
        Ok(count)
    }
}
