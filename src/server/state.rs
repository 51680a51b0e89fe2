//! Application state for the advising service

use std::sync::Arc;

use crate::config::AdvisorConfig;
use crate::error::Result;
use crate::generation::AnswerGenerator;
use crate::providers::{
    ChromaStore, EmbeddingProvider, GeminiClient, LlmProvider, OpenAiEmbedder,
    VectorStoreProvider,
};
use crate::retrieval::Retriever;

/// Answer returned when the trimmed query is empty
pub const EMPTY_QUERY_MESSAGE: &str = "질문을 입력해 주세요.";

/// Shared application state.
///
/// All external clients are constructed once here and passed by `Arc`; request
/// handlers hold no mutable state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdvisorConfig,
    store: Arc<dyn VectorStoreProvider>,
    llm: Arc<dyn LlmProvider>,
    retriever: Retriever,
    generator: AnswerGenerator,
}

impl AppState {
    /// Build state with the production providers: OpenAI embeddings, Chroma,
    /// Gemini.
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbedder::new(&config.embeddings)?);
        let store: Arc<dyn VectorStoreProvider> =
            Arc::new(ChromaStore::new(&config.vector_db, Arc::clone(&embedder))?);
        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiClient::new(&config.llm)?);
        tracing::info!(
            "Providers initialized (embeddings: {} / {} dims, store: {}, llm: {} / {})",
            embedder.name(),
            embedder.dimensions(),
            store.name(),
            llm.name(),
            llm.model()
        );
        Ok(Self::with_providers(config, store, llm))
    }

    /// Build state from explicit providers. This is the seam tests use to
    /// substitute fakes.
    pub fn with_providers(
        config: AdvisorConfig,
        store: Arc<dyn VectorStoreProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        let retriever = Retriever::new(Arc::clone(&store), config.retrieval.clone());
        let generator = AnswerGenerator::new(Arc::clone(&llm));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                llm,
                retriever,
                generator,
            }),
        }
    }

    /// The loaded configuration
    pub fn config(&self) -> &AdvisorConfig {
        &self.inner.config
    }

    /// The vector store handle
    pub fn store(&self) -> &Arc<dyn VectorStoreProvider> {
        &self.inner.store
    }

    /// The LLM handle
    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm
    }

    /// Run the full retrieve-then-generate pipeline for one query.
    ///
    /// Never fails at this boundary: retrieval and generation errors are
    /// rendered as user-facing answer strings, and an empty query short-
    /// circuits with a fixed message.
    pub async fn answer(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return EMPTY_QUERY_MESSAGE.to_string();
        }

        let context = match self.inner.retriever.retrieve(query).await {
            Ok(context) => context,
            Err(e) => {
                tracing::error!("Retrieval failed: {}", e);
                return e.user_message();
            }
        };

        match self.inner.generator.answer(&context, query).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("Generation failed: {}", e);
                e.user_message()
            }
        }
    }
}
