//! One-shot ingestion jobs for the advising corpus
//!
//! Usage:
//!   advisor-ingest report   <report.pdf>          # fixed-size chunks
//!   advisor-ingest semantic <report.pdf> [--dump] # heading-delimited blocks
//!   advisor-ingest graph    <subject_graph.json>  # course graph facts
//!
//! Each job drops and recreates its target collection; re-running on an
//! unchanged source leaves the same document count.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_rag::config::{collections, AdvisorConfig};
use advisor_rag::ingestion::{self, PdfExtractor};
use advisor_rag::providers::{ChromaStore, EmbeddingProvider, OpenAiEmbedder};

#[derive(Debug)]
struct IngestArgs {
    mode: String,
    path: PathBuf,
    dump: bool,
}

/// Parse `<mode> <path> [--dump]`, tolerating the flag in any position.
fn parse_args(args: &[String]) -> anyhow::Result<IngestArgs> {
    let dump = args.iter().any(|a| a == "--dump");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    match (positional.first(), positional.get(1)) {
        (Some(mode), Some(path)) => Ok(IngestArgs {
            mode: (*mode).clone(),
            path: PathBuf::from(path.as_str()),
            dump,
        }),
        _ => bail!("usage: advisor-ingest <report|semantic|graph> <path> [--dump]"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advisor_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let IngestArgs { mode, path, dump } = parse_args(&args)?;
    let mode = mode.as_str();

    let config = AdvisorConfig::load()?;
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbedder::new(&config.embeddings)?);
    let store = ChromaStore::new(&config.vector_db, embedder)?;

    match mode {
        "report" => {
            let stored = ingestion::ingest_report(
                &store,
                &config.chunking,
                &path,
                collections::REPORT,
            )
            .await
            .context("report ingestion failed")?;
            tracing::info!("Report ingested: {} chunks in '{}'", stored, collections::REPORT);
        }
        "semantic" => {
            if dump {
                let blocks = PdfExtractor::new().extract_blocks(&path)?;
                ingestion::dump_blocks_to_file(&blocks, Path::new("semantic_blocks_output.txt"))?;
            }
            let stored = ingestion::ingest_semantic(&store, &path, collections::SEMANTIC)
                .await
                .context("semantic ingestion failed")?;
            tracing::info!(
                "Semantic blocks ingested: {} in '{}'",
                stored,
                collections::SEMANTIC
            );
        }
        "graph" => {
            let stored = ingestion::ingest_graph(&store, &path, collections::GRAPH)
                .await
                .context("graph ingestion failed")?;
            tracing::info!("Graph ingested: {} facts in '{}'", stored, collections::GRAPH);
        }
        other => bail!("unknown mode '{}'; expected report, semantic, or graph", other),
    }

    Ok(())
}
