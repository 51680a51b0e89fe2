//! Gemini client for answer generation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::llm::LlmProvider;

/// Client for the Google Generative Language API
pub struct GeminiClient {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a new Gemini client from config
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::llm(format!(
                "Generation failed: HTTP {}",
                response.status()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse generation response: {}", e)))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::llm("Response contained no candidates"))?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(Error::llm("Response candidate contained no text"));
        }

        Ok(text)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!(
            "{}/v1beta/models/{}",
            self.config.base_url, self.config.model
        );
        match self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
