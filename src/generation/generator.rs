//! Answer generation against the configured LLM provider

use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;

use super::prompt::PromptBuilder;

/// Renders the advising prompt and forwards it to the generative model.
///
/// The model's text output is returned verbatim: no post-processing and no
/// validation of length or content.
pub struct AnswerGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl AnswerGenerator {
    /// Create a generator over an LLM provider
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Generate an answer from retrieved context and the raw query
    pub async fn answer(&self, context: &str, query: &str) -> Result<String> {
        let prompt = PromptBuilder::build_advisor_prompt(context, query);
        tracing::debug!(
            "Generating answer with {} ({})",
            self.llm.name(),
            self.llm.model()
        );
        self.llm.generate(&prompt).await
    }
}
