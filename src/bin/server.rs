//! Advising server binary
//!
//! Run with: cargo run --bin advisor-server

use advisor_rag::{config::AdvisorConfig, server::AdvisorServer, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advisor_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdvisorConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Collections: {:?}", config.retrieval.collections);
    tracing::info!("  - top_k: {}", config.retrieval.top_k);

    if config.llm.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }

    let state = AppState::new(config.clone())?;

    // Startup probes: warn early if either backing service is unreachable.
    tracing::info!("Checking Chroma at {}...", config.vector_db.base_url);
    match state.store().health_check().await {
        Ok(true) => tracing::info!("Chroma is running"),
        _ => {
            tracing::warn!("Chroma not available at {}", config.vector_db.base_url);
            tracing::warn!("Start it with: chroma run --path ./chroma_db");
        }
    }

    tracing::info!("Checking Gemini model {}...", config.llm.model);
    match state.llm().health_check().await {
        Ok(true) => tracing::info!("Gemini is reachable"),
        _ => tracing::warn!(
            "Gemini model {} not reachable; check GEMINI_API_KEY",
            config.llm.model
        ),
    }

    let server = AdvisorServer::with_state(config, state);
    tracing::info!("API: http://{}", server.address());
    tracing::info!("  GET  /    - liveness message");
    tracing::info!("  POST /ask - answer a question");

    server.start().await?;

    Ok(())
}
