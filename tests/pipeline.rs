//! End-to-end pipeline tests over in-memory fakes
//!
//! The fakes stand in for Chroma and Gemini: a deterministic token-overlap
//! store and a canned LLM, wired through the same provider seams the real
//! clients use.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use advisor_rag::config::{AdvisorConfig, RetrievalConfig};
use advisor_rag::error::{Error, Result};
use advisor_rag::ingestion::{self, CollectionLoader};
use advisor_rag::providers::{LlmProvider, VectorStoreProvider};
use advisor_rag::retrieval::{Retriever, FALLBACK_CONTEXT};
use advisor_rag::server::state::EMPTY_QUERY_MESSAGE;
use advisor_rag::server::AdvisorServer;
use advisor_rag::types::{AskResponse, StoredDocument};
use advisor_rag::AppState;

/// In-memory store ranking documents by query-token overlap
#[derive(Default)]
struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<StoredDocument>>>,
}

#[async_trait]
impl VectorStoreProvider for MemoryStore {
    async fn recreate_collection(&self, name: &str) -> Result<()> {
        self.collections
            .lock()
            .unwrap()
            .insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn add(&self, collection: &str, documents: &[StoredDocument]) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| Error::vector_db(format!("no collection '{}'", collection)))?;
        docs.extend_from_slice(documents);
        Ok(())
    }

    async fn query(&self, collection: &str, text: &str, top_k: usize) -> Result<Vec<String>> {
        let collections = self.collections.lock().unwrap();
        let docs = collections.get(collection).cloned().unwrap_or_default();

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut scored: Vec<(usize, String)> = docs
            .into_iter()
            .map(|d| {
                let score = tokens.iter().map(|t| d.text.matches(t).count()).sum();
                (score, d.text)
            })
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(top_k);
        Ok(scored.into_iter().map(|(_, text)| text).collect())
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|d| d.len())
            .unwrap_or(0))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Store whose queries always fail
struct FailingStore;

#[async_trait]
impl VectorStoreProvider for FailingStore {
    async fn recreate_collection(&self, _name: &str) -> Result<()> {
        Ok(())
    }

    async fn add(&self, _collection: &str, _documents: &[StoredDocument]) -> Result<()> {
        Ok(())
    }

    async fn query(&self, _collection: &str, _text: &str, _top_k: usize) -> Result<Vec<String>> {
        Err(Error::vector_db("connection refused"))
    }

    async fn count(&self, _collection: &str) -> Result<usize> {
        Ok(0)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// LLM that echoes the prompt it received, prefixed
struct EchoLlm;

#[async_trait]
impl LlmProvider for EchoLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(format!("답변: {}", prompt))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo-1"
    }
}

/// LLM whose generation always fails
struct FailingLlm;

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(Error::llm("HTTP 503"))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "failing-1"
    }
}

const GRAPH_FIXTURE: &str = r#"{
    "nodes": [{"id": "A", "priority": 1}, {"id": "B", "priority": 2}],
    "edges": [{"from": "A", "to": "B", "track": "core"}],
    "topological_order": ["A", "B"],
    "shortest_paths": {"A-B": ["A", "B"]}
}"#;

fn write_graph_fixture() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("advisor-rag-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("subject_graph.json");
    std::fs::write(&path, GRAPH_FIXTURE).unwrap();
    path
}

fn retrieval_over(collections: &[&str]) -> RetrievalConfig {
    RetrievalConfig {
        collections: collections.iter().map(|c| c.to_string()).collect(),
        top_k: 10,
        dedupe: false,
        max_distinct_docs: None,
        max_context_chars: None,
    }
}

#[tokio::test]
async fn graph_ingest_stores_one_document_per_record() {
    let store = MemoryStore::default();
    let path = write_graph_fixture();

    let stored = ingestion::ingest_graph(&store, &path, "education_graph")
        .await
        .unwrap();

    // 2 nodes + 1 edge + 1 order + 1 path
    assert_eq!(stored, 5);
    assert_eq!(store.count("education_graph").await.unwrap(), 5);
}

#[tokio::test]
async fn graph_documents_are_retrievable_by_course_name() {
    let store = Arc::new(MemoryStore::default());
    let path = write_graph_fixture();
    ingestion::ingest_graph(store.as_ref(), &path, "education_graph")
        .await
        .unwrap();

    let retriever = Retriever::new(store.clone(), retrieval_over(&["education_graph"]));

    let for_a = retriever.retrieve("A").await.unwrap();
    assert!(for_a.contains("과목명: A, 우선순위: 1"));
    assert!(for_a.contains("'A' 과목은 'B' 과목의 선수과목입니다. 트랙: core"));
    assert!(for_a.contains("과목을 듣는 추천 순서: A → B"));
    assert!(for_a.contains("A-B 최단경로: A → B"));

    let for_b = retriever.retrieve("B").await.unwrap();
    assert!(for_b.contains("과목명: B, 우선순위: 2"));
}

#[tokio::test]
async fn reingest_is_idempotent() {
    let store = MemoryStore::default();
    let path = write_graph_fixture();

    let first = ingestion::ingest_graph(&store, &path, "education_graph")
        .await
        .unwrap();
    let second = ingestion::ingest_graph(&store, &path, "education_graph")
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(store.count("education_graph").await.unwrap(), first);
}

#[tokio::test]
async fn retriever_falls_back_when_nothing_matches() {
    let store = Arc::new(MemoryStore::default());
    store.recreate_collection("education_report").await.unwrap();
    store.recreate_collection("education_graph").await.unwrap();

    let retriever = Retriever::new(
        store,
        retrieval_over(&["education_report", "education_graph"]),
    );
    let context = retriever.retrieve("존재하지 않는 과목").await.unwrap();
    assert_eq!(context, FALLBACK_CONTEXT);
}

#[tokio::test]
async fn dedup_keeps_first_seen_order_across_collections() {
    let store = Arc::new(MemoryStore::default());
    let loader = CollectionLoader::new(store.as_ref());
    loader
        .load(
            "first",
            vec![
                ("과목 중복 안내문".to_string(), serde_json::json!({})),
                ("과목 첫째 고유문".to_string(), serde_json::json!({})),
            ],
        )
        .await
        .unwrap();
    loader
        .load(
            "second",
            vec![
                ("과목 중복 안내문".to_string(), serde_json::json!({})),
                ("과목 둘째 고유문".to_string(), serde_json::json!({})),
            ],
        )
        .await
        .unwrap();

    let mut config = retrieval_over(&["first", "second"]);
    config.dedupe = true;
    let retriever = Retriever::new(store, config);

    let context = retriever.retrieve("과목").await.unwrap();
    let lines: Vec<&str> = context.lines().collect();
    assert_eq!(
        lines,
        vec!["과목 중복 안내문", "과목 첫째 고유문", "과목 둘째 고유문"]
    );
}

#[tokio::test]
async fn context_is_trimmed_to_configured_bounds() {
    let store = Arc::new(MemoryStore::default());
    let loader = CollectionLoader::new(store.as_ref());
    let long_doc = format!("과목 {}", "상세 설명 ".repeat(200));
    loader
        .load(
            "semantic_education_chunks",
            vec![
                (long_doc.clone(), serde_json::json!({})),
                (format!("{} 둘째", long_doc), serde_json::json!({})),
                (format!("{} 셋째", long_doc), serde_json::json!({})),
                (format!("{} 넷째", long_doc), serde_json::json!({})),
            ],
        )
        .await
        .unwrap();

    let retriever = Retriever::new(store, RetrievalConfig::semantic());
    let context = retriever.retrieve("과목").await.unwrap();

    assert!(context.chars().count() <= 1500);
    // At most 3 distinct documents survive trimming
    assert!(context.lines().count() <= 3);
}

async fn post_ask(state: AppState, query: &str) -> (StatusCode, AskResponse) {
    let config = state.config().clone();
    let router = AdvisorServer::with_state(config, state)
        .build_router()
        .unwrap();

    let body = serde_json::to_string(&serde_json::json!({ "query": query })).unwrap();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ask")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let parsed: AskResponse = serde_json::from_slice(&bytes).unwrap();
    (status, parsed)
}

fn app_state(store: Arc<dyn VectorStoreProvider>, llm: Arc<dyn LlmProvider>) -> AppState {
    let mut config = AdvisorConfig::default();
    config.retrieval = retrieval_over(&["education_report", "education_graph"]);
    AppState::with_providers(config, store, llm)
}

#[tokio::test]
async fn ask_endpoint_answers_with_retrieved_context() {
    let store = Arc::new(MemoryStore::default());
    let path = write_graph_fixture();
    ingestion::ingest_graph(store.as_ref(), &path, "education_graph")
        .await
        .unwrap();
    store.recreate_collection("education_report").await.unwrap();

    let state = app_state(store, Arc::new(EchoLlm));
    let (status, response) = post_ask(state, "A 다음에는 뭘 들어야 하나요?").await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.answer.starts_with("답변:"));
    // The prompt the LLM saw carried the retrieved fact and the question
    assert!(response.answer.contains("'A' 과목은 'B' 과목의 선수과목입니다"));
    assert!(response.answer.contains("A 다음에는 뭘 들어야 하나요?"));
}

#[tokio::test]
async fn empty_query_returns_prompt_message() {
    let state = app_state(Arc::new(MemoryStore::default()), Arc::new(EchoLlm));
    let (status, response) = post_ask(state, "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.answer, EMPTY_QUERY_MESSAGE);
}

#[tokio::test]
async fn whitespace_query_is_treated_as_empty() {
    let state = app_state(Arc::new(MemoryStore::default()), Arc::new(EchoLlm));
    let (_, response) = post_ask(state, "   \n ").await;
    assert_eq!(response.answer, EMPTY_QUERY_MESSAGE);
}

#[tokio::test]
async fn retrieval_failure_surfaces_as_user_facing_answer() {
    let state = app_state(Arc::new(FailingStore), Arc::new(EchoLlm));
    let (status, response) = post_ask(state, "자료구조는 언제 들어요?").await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.answer.starts_with("DB 검색 중 오류가 발생했습니다"));
}

#[tokio::test]
async fn generation_failure_surfaces_as_user_facing_answer() {
    let store = Arc::new(MemoryStore::default());
    let path = write_graph_fixture();
    ingestion::ingest_graph(store.as_ref(), &path, "education_graph")
        .await
        .unwrap();
    store.recreate_collection("education_report").await.unwrap();

    let state = app_state(store, Arc::new(FailingLlm));
    let (status, response) = post_ask(state, "A 과목 알려주세요").await;

    assert_eq!(status, StatusCode::OK);
    assert!(response
        .answer
        .starts_with("Gemini 응답 생성 중 오류가 발생했습니다"));
}

#[tokio::test]
async fn startup_probes_report_provider_health() {
    let healthy = app_state(Arc::new(MemoryStore::default()), Arc::new(EchoLlm));
    assert!(healthy.store().health_check().await.unwrap());
    assert!(healthy.llm().health_check().await.unwrap());

    let degraded = app_state(Arc::new(FailingStore), Arc::new(FailingLlm));
    assert!(!degraded.store().health_check().await.unwrap());
    assert!(!degraded.llm().health_check().await.unwrap());
}

#[tokio::test]
async fn root_route_reports_liveness() {
    let state = app_state(Arc::new(MemoryStore::default()), Arc::new(EchoLlm));
    let config = state.config().clone();
    let router = AdvisorServer::with_state(config, state)
        .build_router()
        .unwrap();

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(value["message"]
        .as_str()
        .unwrap()
        .contains("컴공도우미봇 API가 실행 중입니다"));
}
