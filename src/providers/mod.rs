//! Provider abstractions for embeddings, LLM generation, and vector storage
//!
//! Trait-based seams so the pipeline can run against the hosted services
//! (OpenAI embeddings, Gemini, Chroma) in production and deterministic fakes
//! in tests.

pub mod chroma;
pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod openai;
pub mod vector_store;

pub use chroma::ChromaStore;
pub use embedding::EmbeddingProvider;
pub use gemini::GeminiClient;
pub use llm::LlmProvider;
pub use openai::OpenAiEmbedder;
pub use vector_store::VectorStoreProvider;
