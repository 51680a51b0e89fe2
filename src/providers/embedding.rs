//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings
///
/// Implementations:
/// - `OpenAiEmbedder`: hosted OpenAI embeddings (text-embedding-3-small)
/// - test fakes with deterministic vectors
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts (batch)
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Embedding dimensions (1536 for text-embedding-3-small)
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}
