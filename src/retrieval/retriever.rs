//! Multi-collection retriever with configurable merging policy

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::providers::VectorStoreProvider;

/// Context substituted when no collection returns a document, so generation
/// always receives a non-empty context.
pub const FALLBACK_CONTEXT: &str = "관련된 정보를 찾을 수 없습니다.";

/// Queries every configured collection and merges the results into one
/// bounded context string.
pub struct Retriever {
    store: Arc<dyn VectorStoreProvider>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a retriever over a store with the given policy
    pub fn new(store: Arc<dyn VectorStoreProvider>, config: RetrievalConfig) -> Self {
        Self { store, config }
    }

    /// The active retrieval policy
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Retrieve context for a query.
    ///
    /// Collections are searched independently and concatenated in
    /// declaration order; an error from any collection aborts the whole
    /// retrieval (the caller renders it as a user-facing answer).
    pub async fn retrieve(&self, query: &str) -> Result<String> {
        let mut documents = Vec::new();
        for collection in &self.config.collections {
            let hits = self
                .store
                .query(collection, query, self.config.top_k)
                .await?;
            tracing::debug!("Collection '{}' returned {} documents", collection, hits.len());
            documents.extend(hits);
        }

        if documents.is_empty() {
            documents.push(FALLBACK_CONTEXT.to_string());
        }

        if self.config.dedupe {
            let mut seen = HashSet::new();
            documents.retain(|doc| seen.insert(doc.clone()));
        }

        if let Some(max) = self.config.max_distinct_docs {
            documents.truncate(max);
        }

        let mut context = documents.join("\n");

        if let Some(max_chars) = self.config.max_context_chars {
            context = truncate_chars(&context, max_chars);
        }

        Ok(context)
    }
}

/// Truncate to at most `max` characters, respecting UTF-8 boundaries
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
