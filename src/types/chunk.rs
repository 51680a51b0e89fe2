//! Stored document and extraction types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document ready for insertion into a collection.
///
/// Identity is the randomly generated id; the text and metadata are immutable
/// once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Unique identifier
    pub id: Uuid,
    /// Document text (the unit of retrieval)
    pub text: String,
    /// Arbitrary metadata attached at ingestion time
    pub metadata: serde_json::Value,
}

impl StoredDocument {
    /// Create a document with a fresh random id
    pub fn new(text: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            metadata,
        }
    }
}

/// Metadata attached to chunks of the curriculum report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkMetadata {
    /// Human-readable source name
    pub source: String,
    /// Page number (semantic blocks only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Section heading the block was filed under (semantic blocks only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    /// Position in the chunk sequence (plain chunking only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,
}

impl ChunkMetadata {
    /// Metadata for a fixed-size chunk
    pub fn chunked(source: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            source: source.into(),
            page: None,
            section_title: None,
            chunk_index: Some(chunk_index),
        }
    }

    /// Metadata for a heading-segmented semantic block
    pub fn semantic(source: impl Into<String>, page: u32, section_title: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            page: Some(page),
            section_title: Some(section_title.into()),
            chunk_index: None,
        }
    }
}

/// A heading-delimited block of page text, in reading order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticBlock {
    /// 1-based page number
    pub page: u32,
    /// Heading line that opened the block, or the default title
    pub section_title: String,
    /// Block body, lines joined with newlines
    pub content: String,
}
