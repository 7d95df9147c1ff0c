//! End-to-end tests for the HTTP layer, running against the in-memory
//! engine with deterministic embedding and article providers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::Value;

use lexivec_domain::error::{Error, Result};
use lexivec_domain::ports::EmbeddingProvider;
use lexivec_domain::value_objects::{Embedding, IndexSchema};
use lexivec_providers::article_source::NullArticleSource;
use lexivec_providers::embedding::NullEmbeddingProvider;
use lexivec_providers::search_index::{InMemorySearchIndex, SearchTuning};
use lexivec_server::handlers::INDEX_UNAVAILABLE_ADVISORY;
use lexivec_server::{SearchContext, build_rocket};

const DIMS: usize = 8;

/// Embedding provider that fails on one specific call, for exercising
/// the non-transactional reindex path.
struct FailingEmbedder {
    inner: NullEmbeddingProvider,
    calls: AtomicUsize,
    fail_on_call: usize,
}

impl FailingEmbedder {
    fn new(fail_on_call: usize) -> Self {
        Self {
            inner: NullEmbeddingProvider::new(DIMS),
            calls: AtomicUsize::new(0),
            fail_on_call,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on_call {
            return Err(Error::embedding("simulated model failure"));
        }
        self.inner.embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}

fn test_client(embedder: Arc<dyn EmbeddingProvider>) -> Client {
    let context = SearchContext {
        search_index: Arc::new(
            InMemorySearchIndex::new(
                "articles-test",
                SearchTuning {
                    fuzziness: 0,
                    ..SearchTuning::default()
                },
            )
            .unwrap(),
        ),
        embedder,
        article_source: Arc::new(NullArticleSource::new()),
        schema: IndexSchema::new(DIMS).unwrap(),
        titles: vec!["Rabies".to_string(), "Cat flu".to_string()],
    };
    Client::tracked(build_rocket(context)).expect("failed to build client")
}

fn search(client: &Client, query: &str) -> (Status, Option<Vec<Value>>) {
    let response = client
        .post("/search")
        .header(ContentType::JSON)
        .body(serde_json::json!({ "query": query }).to_string())
        .dispatch();
    let status = response.status();
    let body = response.into_json::<Vec<Value>>();
    (status, body)
}

#[test]
fn health_endpoint_reports_ok() {
    let client = test_client(Arc::new(NullEmbeddingProvider::new(DIMS)));
    let response = client.get("/health").dispatch();
    assert_eq!(response.status(), Status::Ok);
}

#[test]
fn search_before_reindex_is_503_with_advice() {
    let client = test_client(Arc::new(NullEmbeddingProvider::new(DIMS)));
    let response = client
        .post("/search")
        .header(ContentType::JSON)
        .body(serde_json::json!({ "query": "rabies" }).to_string())
        .dispatch();

    assert_eq!(response.status(), Status::ServiceUnavailable);
    assert_eq!(
        response.into_string().as_deref(),
        Some(INDEX_UNAVAILABLE_ADVISORY)
    );
}

#[test]
fn reindex_then_search_returns_projected_articles() {
    let client = test_client(Arc::new(NullEmbeddingProvider::new(DIMS)));

    let response = client.post("/reindex").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["indexed"], 2);

    let (status, results) = search(&client, "Rabies");
    assert_eq!(status, Status::Ok);
    let results = results.unwrap();
    assert!(!results.is_empty());
    assert_eq!(results[0]["title"], "Rabies");

    // Projections never expose embedding vectors.
    let first = results[0].as_object().unwrap();
    assert_eq!(first.len(), 3);
    assert!(!first.contains_key("title_embedding"));
}

#[test]
fn reindex_is_idempotent_via_drop_and_recreate() {
    let client = test_client(Arc::new(NullEmbeddingProvider::new(DIMS)));

    for _ in 0..2 {
        let response = client.post("/reindex").dispatch();
        assert_eq!(response.status(), Status::Ok);
    }

    let (_, results) = search(&client, "Rabies");
    // Two cycles over two titles still store two documents, not four.
    let titles: Vec<&str> = results
        .as_ref()
        .unwrap()
        .iter()
        .filter_map(|r| r["title"].as_str())
        .collect();
    assert_eq!(titles.iter().filter(|t| **t == "Rabies").count(), 1);
}

#[test]
fn failed_reindex_leaves_the_partial_index_in_place() {
    // The second article's embedding call fails: one article is already
    // indexed by then and stays indexed.
    let client = test_client(Arc::new(FailingEmbedder::new(2)));

    let response = client.post("/reindex").dispatch();
    assert_eq!(response.status(), Status::InternalServerError);

    let (status, results) = search(&client, "anything");
    assert_eq!(status, Status::Ok);
    let results = results.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Rabies");

    // A later reindex cycle replaces the partial index completely.
    let response = client.post("/reindex").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["indexed"], 2);

    let (_, results) = search(&client, "Cat flu");
    let titles: Vec<&str> = results
        .as_ref()
        .unwrap()
        .iter()
        .filter_map(|r| r["title"].as_str())
        .collect();
    assert!(titles.contains(&"Cat flu"));
}
