//! LLM provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for prompt-in, text-out generation
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API
/// - test fakes with canned answers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for a fully rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check whether the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier in use
    fn model(&self) -> &str;
}
