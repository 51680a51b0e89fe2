//! OpenAI embedding client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;

/// text-embedding-3-small dimensions
const DIMENSIONS: usize = 1536;

/// Embedding client for the OpenAI embeddings API
pub struct OpenAiEmbedder {
    client: Client,
    config: EmbeddingConfig,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    /// Create a new embedder from config
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn request(&self, input: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/v1/embeddings", self.config.base_url);
        let request = EmbeddingsRequest {
            model: &self.config.model,
            input,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::embedding(format!(
                "Embedding failed: HTTP {}",
                response.status()
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Failed to parse embedding response: {}", e)))?;

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let input = [text.to_string()];
        let mut embeddings = self.request(&input).await?;
        embeddings
            .pop()
            .ok_or_else(|| Error::embedding("Empty embedding response"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let embeddings = self.request(texts).await?;
        if embeddings.len() != texts.len() {
            return Err(Error::embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbeddingConfig;

    #[test]
    fn test_reports_model_dimensions() {
        let embedder = OpenAiEmbedder::new(&EmbeddingConfig::default()).unwrap();
        assert_eq!(embedder.dimensions(), 1536);
        assert_eq!(embedder.name(), "openai");
    }
}
