//! Tests for the embedding providers

use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;

use lexivec_domain::error::Error;
use lexivec_domain::ports::EmbeddingProvider;
use lexivec_providers::embedding::{NullEmbeddingProvider, OllamaEmbeddingProvider};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Runtime::new()
        .expect("failed to build runtime")
        .block_on(future)
}

fn ollama_provider(base_url: String, dimensions: usize) -> OllamaEmbeddingProvider {
    OllamaEmbeddingProvider::new(
        base_url,
        "nomic-embed-text".to_string(),
        dimensions,
        Duration::from_secs(5),
        reqwest::Client::new(),
    )
}

#[test]
fn ollama_provider_reports_its_identity() {
    let provider = ollama_provider("http://localhost:11434".to_string(), 768);
    assert_eq!(provider.provider_name(), "ollama");
    assert_eq!(provider.model(), "nomic-embed-text");
    assert_eq!(provider.dimensions(), 768);
}

#[test]
fn ollama_embed_posts_model_and_prompt() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/embeddings")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "nomic-embed-text",
            "prompt": "Hello, world!",
        })))
        .with_status(200)
        .with_body(json!({ "embedding": [0.25, 0.5, 0.75, 1.0] }).to_string())
        .create();

    let provider = ollama_provider(server.url(), 4);
    let embedding = block_on(provider.embed("Hello, world!")).unwrap();

    mock.assert();
    assert_eq!(embedding.vector, vec![0.25, 0.5, 0.75, 1.0]);
    assert_eq!(embedding.dimensions, 4);
    assert_eq!(embedding.model, "nomic-embed-text");
}

#[test]
fn ollama_batch_preserves_input_order() {
    let mut server = Server::new();
    server
        .mock("POST", "/api/embeddings")
        .match_body(Matcher::PartialJson(json!({ "prompt": "first" })))
        .with_status(200)
        .with_body(json!({ "embedding": [1.0, 0.0] }).to_string())
        .create();
    server
        .mock("POST", "/api/embeddings")
        .match_body(Matcher::PartialJson(json!({ "prompt": "second" })))
        .with_status(200)
        .with_body(json!({ "embedding": [0.0, 1.0] }).to_string())
        .create();

    let provider = ollama_provider(server.url(), 2);
    let embeddings = block_on(
        provider.embed_batch(&["first".to_string(), "second".to_string()]),
    )
    .unwrap();

    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0].vector, vec![1.0, 0.0]);
    assert_eq!(embeddings[1].vector, vec![0.0, 1.0]);
}

#[test]
fn ollama_rejects_dimension_drift() {
    let mut server = Server::new();
    server
        .mock("POST", "/api/embeddings")
        .with_status(200)
        .with_body(json!({ "embedding": [0.1, 0.2, 0.3] }).to_string())
        .create();

    let provider = ollama_provider(server.url(), 512);
    let err = block_on(provider.embed("drifted")).unwrap_err();
    assert!(matches!(err, Error::Embedding { .. }));
}

#[test]
fn ollama_surfaces_server_errors() {
    let mut server = Server::new();
    server
        .mock("POST", "/api/embeddings")
        .with_status(500)
        .with_body("model not loaded")
        .create();

    let provider = ollama_provider(server.url(), 4);
    let err = block_on(provider.embed("anything")).unwrap_err();
    assert!(matches!(err, Error::Embedding { .. }));
}

#[test]
fn null_provider_is_usable_through_the_port() {
    let provider: Box<dyn EmbeddingProvider> = Box::new(NullEmbeddingProvider::new(8));
    let embedding = block_on(provider.embed("stable text")).unwrap();
    let again = block_on(provider.embed("stable text")).unwrap();

    assert_eq!(provider.dimensions(), 8);
    assert_eq!(embedding, again);
    assert_eq!(embedding.vector.len(), 8);
}
