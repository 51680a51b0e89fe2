//! Chroma vector store client
//!
//! Talks to a Chroma server over its v1 REST API. The server stores raw
//! embeddings, so this client computes them via the injected
//! `EmbeddingProvider` on both the add and query paths.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::types::StoredDocument;

use super::embedding::EmbeddingProvider;
use super::vector_store::VectorStoreProvider;

/// Chroma HTTP client with client-side embedding
pub struct ChromaStore {
    client: Client,
    base_url: String,
    embedder: Arc<dyn EmbeddingProvider>,
}

#[derive(Deserialize)]
struct Collection {
    id: String,
}

#[derive(Serialize)]
struct AddRequest {
    ids: Vec<String>,
    documents: Vec<String>,
    metadatas: Vec<serde_json::Value>,
    embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct QueryResponse {
    /// One inner list per query text; we always send exactly one
    #[serde(default)]
    documents: Vec<Vec<String>>,
}

impl ChromaStore {
    /// Create a new store client from config
    pub fn new(config: &VectorDbConfig, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            embedder,
        })
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    /// Resolve a collection name to its server-side id
    async fn collection_id(&self, name: &str) -> Result<String> {
        let response = self
            .client
            .get(self.api(&format!("collections/{}", name)))
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to look up collection: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::vector_db(format!(
                "Collection '{}' lookup failed: HTTP {}",
                name,
                response.status()
            )));
        }

        let collection: Collection = response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse collection: {}", e)))?;
        Ok(collection.id)
    }
}

#[async_trait]
impl VectorStoreProvider for ChromaStore {
    async fn recreate_collection(&self, name: &str) -> Result<()> {
        // A 404 just means a first-time ingestion run; any other delete
        // failure leaves the old collection in place, so the job must abort
        // before get_or_create resolves it and documents get duplicated.
        let response = self
            .client
            .delete(self.api(&format!("collections/{}", name)))
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to delete collection: {}", e)))?;
        check_delete_status(name, response.status())?;
        if response.status().is_success() {
            tracing::info!("Deleted existing collection '{}'", name);
        }

        let response = self
            .client
            .post(self.api("collections"))
            .json(&json!({ "name": name, "get_or_create": true }))
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to create collection: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::vector_db(format!(
                "Collection '{}' creation failed: HTTP {}",
                name,
                response.status()
            )));
        }

        Ok(())
    }

    async fn add(&self, collection: &str, documents: &[StoredDocument]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let id = self.collection_id(collection).await?;
        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let request = AddRequest {
            ids: documents.iter().map(|d| d.id.to_string()).collect(),
            documents: texts,
            metadatas: documents.iter().map(|d| d.metadata.clone()).collect(),
            embeddings,
        };

        let response = self
            .client
            .post(self.api(&format!("collections/{}/add", id)))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to add documents: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::vector_db(format!(
                "Add to '{}' failed: HTTP {}",
                collection,
                response.status()
            )));
        }

        Ok(())
    }

    async fn query(&self, collection: &str, text: &str, top_k: usize) -> Result<Vec<String>> {
        let id = self.collection_id(collection).await?;
        let embedding = self.embedder.embed(text).await?;

        let response = self
            .client
            .post(self.api(&format!("collections/{}/query", id)))
            .json(&json!({
                "query_embeddings": [embedding],
                "n_results": top_k,
                "include": ["documents"],
            }))
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Query failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::vector_db(format!(
                "Query against '{}' failed: HTTP {}",
                collection,
                response.status()
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse query response: {}", e)))?;

        Ok(parsed.documents.into_iter().next().unwrap_or_default())
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let id = self.collection_id(collection).await?;
        let response = self
            .client
            .get(self.api(&format!("collections/{}/count", id)))
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Count failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::vector_db(format!(
                "Count of '{}' failed: HTTP {}",
                collection,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse count: {}", e)))
    }

    async fn health_check(&self) -> Result<bool> {
        match self.client.get(self.api("heartbeat")).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "chroma"
    }
}

/// Classify a collection-delete status: success and "not found" let the
/// recreate proceed, anything else aborts the batch job.
fn check_delete_status(name: &str, status: StatusCode) -> Result<()> {
    if status.is_success() || status == StatusCode::NOT_FOUND {
        Ok(())
    } else {
        Err(Error::vector_db(format!(
            "Collection '{}' deletion failed: HTTP {}",
            name, status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_status_success_and_absent_proceed() {
        assert!(check_delete_status("education_graph", StatusCode::OK).is_ok());
        assert!(check_delete_status("education_graph", StatusCode::NOT_FOUND).is_ok());
    }

    #[test]
    fn test_delete_status_server_error_aborts() {
        let err = check_delete_status("education_graph", StatusCode::INTERNAL_SERVER_ERROR)
            .unwrap_err();
        assert!(matches!(err, Error::VectorDb(_)));
        assert!(err.to_string().contains("deletion failed"));
    }
}
