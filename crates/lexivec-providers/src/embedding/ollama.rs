//! Ollama embedding provider
//!
//! Implements the `EmbeddingProvider` port against Ollama's local
//! embedding API (`/api/embeddings`), one request per text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use lexivec_domain::error::{Error, Result};
use lexivec_domain::ports::EmbeddingProvider;
use lexivec_domain::value_objects::Embedding;

use crate::constants::CONTENT_TYPE_JSON;
use crate::utils::check_and_parse;

/// Ollama embedding provider.
///
/// The configured dimensionality is authoritative: a response whose
/// vector length disagrees with it is rejected, which keeps one index
/// from ever mixing dimensionalities.
pub struct OllamaEmbeddingProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
    http_client: Client,
}

impl OllamaEmbeddingProvider {
    /// Create a new Ollama embedding provider
    ///
    /// # Arguments
    /// * `base_url` - Ollama server URL (e.g. "http://localhost:11434")
    /// * `model` - Model name (e.g. "nomic-embed-text")
    /// * `dimensions` - Expected vector dimensionality for `model`
    /// * `timeout` - Per-request timeout
    /// * `http_client` - Reqwest client for API requests
    pub fn new(
        base_url: String,
        model: String,
        dimensions: usize,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            base_url,
            model,
            dimensions,
            timeout,
            http_client,
        }
    }

    /// Model name this provider queries
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn fetch_single_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let payload = serde_json::json!({
            "model": self.model,
            "prompt": text,
            "stream": false,
        });

        let response = self
            .http_client
            .post(format!(
                "{}/api/embeddings",
                self.base_url.trim_end_matches('/')
            ))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::embedding(format!("ollama request timed out after {:?}", self.timeout))
                } else {
                    Error::embedding(format!("ollama request failed: {}", e))
                }
            })?;

        let body = check_and_parse(response, "ollama", Error::embedding).await?;
        let vector: Vec<f32> = body
            .get("embedding")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::embedding("ollama response is missing the embedding array"))?
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| Error::embedding("ollama embedding contains a non-number"))
            })
            .collect::<Result<_>>()?;

        if vector.len() != self.dimensions {
            return Err(Error::embedding(format!(
                "ollama returned {} dimensions, expected {}",
                vector.len(),
                self.dimensions
            )));
        }
        Ok(vector)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            let vector = self.fetch_single_embedding(text).await?;
            embeddings.push(Embedding {
                dimensions: vector.len(),
                vector,
                model: self.model.clone(),
            });
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}
