//! Configuration for the advising chatbot

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// LLM (Gemini) configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Vector store (Chroma) configuration
    #[serde(default)]
    pub vector_db: VectorDbConfig,
}

impl AdvisorConfig {
    /// Load configuration from `advisor.toml` (path overridable via
    /// `ADVISOR_CONFIG`), then apply environment overrides for credentials
    /// and endpoints.
    pub fn load() -> Result<Self> {
        let path = std::env::var("ADVISOR_CONFIG").unwrap_or_else(|_| "advisor.toml".to_string());
        let mut config = if Path::new(&path).exists() {
            let raw = std::fs::read_to_string(&path)?;
            toml::from_str(&raw)
                .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path, e)))?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply environment overrides (`GEMINI_API_KEY`, `OPENAI_API_KEY`,
    /// `CHROMA_URL`).
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.llm.api_key = key;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.embeddings.api_key = key;
        }
        if let Ok(url) = std::env::var("CHROMA_URL") {
            self.vector_db.base_url = url;
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Allowed CORS origin (the development frontend)
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origin: "http://localhost:3000".to_string(),
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 700,
            chunk_overlap: 100,
        }
    }
}

/// Retrieval configuration
///
/// The deployment variants differ only in these knobs: the merged variant
/// searches two collections with no trimming, the semantic variant searches
/// one collection and trims the context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Collections to search, in declaration order
    pub collections: Vec<String>,
    /// Nearest neighbors requested per collection
    pub top_k: usize,
    /// Drop exact-text duplicates, preserving first-seen order
    #[serde(default)]
    pub dedupe: bool,
    /// Keep at most this many documents after deduplication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distinct_docs: Option<usize>,
    /// Truncate the joined context to this many characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_context_chars: Option<usize>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self::merged()
    }
}

impl RetrievalConfig {
    /// Merged variant: report + graph collections, top 10 each, no trimming.
    pub fn merged() -> Self {
        Self {
            collections: vec![
                collections::REPORT.to_string(),
                collections::GRAPH.to_string(),
            ],
            top_k: 10,
            dedupe: false,
            max_distinct_docs: None,
            max_context_chars: None,
        }
    }

    /// Semantic variant: heading-segmented collection only, deduplicated and
    /// trimmed to 3 documents / 1500 characters.
    pub fn semantic() -> Self {
        Self {
            collections: vec![collections::SEMANTIC.to_string()],
            top_k: 10,
            dedupe: true,
            max_distinct_docs: Some(3),
            max_context_chars: Some(1500),
        }
    }
}

/// LLM (Gemini) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Gemini API base URL
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// API key (usually supplied via `GEMINI_API_KEY`)
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-pro".to_string(),
            api_key: String::new(),
            timeout_secs: 120,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// OpenAI API base URL
    pub base_url: String,
    /// Embedding model name
    pub model: String,
    /// API key (usually supplied via `OPENAI_API_KEY`)
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

/// Vector store (Chroma) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Chroma server base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Collection names are a compatibility contract between ingestion and
/// retrieval; renaming one breaks the pairing for already-ingested data.
pub mod collections {
    /// Chunked curriculum report
    pub const REPORT: &str = "education_report";
    /// Serialized course-dependency graph
    pub const GRAPH: &str = "education_graph";
    /// Heading-segmented semantic blocks
    pub const SEMANTIC: &str = "semantic_education_chunks";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.chunking.chunk_size, 700);
        assert_eq!(config.chunking.chunk_overlap, 100);
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(
            config.retrieval.collections,
            vec!["education_report", "education_graph"]
        );
        assert!(!config.retrieval.dedupe);
    }

    #[test]
    fn test_semantic_variant() {
        let retrieval = RetrievalConfig::semantic();
        assert_eq!(retrieval.collections, vec!["semantic_education_chunks"]);
        assert!(retrieval.dedupe);
        assert_eq!(retrieval.max_distinct_docs, Some(3));
        assert_eq!(retrieval.max_context_chars, Some(1500));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AdvisorConfig::default();
        let raw = toml::to_string(&config).unwrap();
        let parsed: AdvisorConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.retrieval.collections, config.retrieval.collections);
    }
}
