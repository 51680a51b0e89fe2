//! Offline ingestion pipelines: PDF report and course graph into collections
//!
//! Each pipeline is a one-shot batch job: extract or serialize, then rebuild
//! the target collection. Jobs are not safe to run concurrently against the
//! same collection name.

pub mod chunker;
pub mod extractor;
pub mod graph;
pub mod loader;

pub use chunker::TextChunker;
pub use extractor::PdfExtractor;
pub use graph::{load_graph, serialize_graph};
pub use loader::CollectionLoader;

use std::path::Path;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::providers::VectorStoreProvider;
use crate::types::ChunkMetadata;

/// Human-readable source label attached to report chunks
pub const REPORT_SOURCE: &str = "역량중심 교육과정 보고서";

/// Ingest the curriculum report as fixed-size overlapping chunks.
///
/// PDF → whole text → chunks → drop-and-recreate `collection`. Returns the
/// number of stored documents.
pub async fn ingest_report(
    store: &dyn VectorStoreProvider,
    chunking: &ChunkingConfig,
    pdf_path: &Path,
    collection: &str,
) -> Result<usize> {
    let extractor = PdfExtractor::new();
    let text = extractor.extract_text(pdf_path)?;

    let chunker = TextChunker::new(chunking.chunk_size, chunking.chunk_overlap);
    let chunks = chunker.split(&text);
    tracing::info!("Chunked report into {} passages", chunks.len());

    let pairs = chunks
        .into_iter()
        .enumerate()
        .map(|(idx, chunk)| {
            let metadata = ChunkMetadata::chunked(REPORT_SOURCE, idx);
            Ok((chunk, serde_json::to_value(metadata)?))
        })
        .collect::<Result<Vec<_>>>()?;

    CollectionLoader::new(store).load(collection, pairs).await
}

/// Ingest the curriculum report as heading-delimited semantic blocks.
pub async fn ingest_semantic(
    store: &dyn VectorStoreProvider,
    pdf_path: &Path,
    collection: &str,
) -> Result<usize> {
    let extractor = PdfExtractor::new();
    let blocks = extractor.extract_blocks(pdf_path)?;

    let pairs = blocks
        .into_iter()
        .map(|block| {
            let metadata = ChunkMetadata::semantic(REPORT_SOURCE, block.page, block.section_title);
            Ok((block.content, serde_json::to_value(metadata)?))
        })
        .collect::<Result<Vec<_>>>()?;

    CollectionLoader::new(store).load(collection, pairs).await
}

/// Ingest the course-dependency graph as natural-language facts.
pub async fn ingest_graph(
    store: &dyn VectorStoreProvider,
    json_path: &Path,
    collection: &str,
) -> Result<usize> {
    let graph = load_graph(json_path)?;
    let facts = serialize_graph(&graph);
    tracing::info!("Serialized graph into {} facts", facts.len());

    let pairs = facts
        .into_iter()
        .map(|fact| Ok((fact.text, serde_json::to_value(fact.metadata)?)))
        .collect::<Result<Vec<_>>>()?;

    CollectionLoader::new(store).load(collection, pairs).await
}

/// Write extracted blocks to a UTF-8 review file next to the store, one
/// numbered section per block.
pub fn dump_blocks_to_file(
    blocks: &[crate::types::SemanticBlock],
    output_path: &Path,
) -> Result<()> {
    let mut out = String::new();
    for (idx, block) in blocks.iter().enumerate() {
        out.push_str(&format!("==== 블록 {} ====\n", idx + 1));
        out.push_str(&format!("페이지 번호: {}\n", block.page));
        out.push_str(&format!("섹션 제목: {}\n", block.section_title));
        out.push_str(&format!("내용:\n{}\n\n\n", block.content));
    }
    std::fs::write(output_path, out)?;
    tracing::info!("Wrote {} blocks to {}", blocks.len(), output_path.display());
    Ok(())
}
