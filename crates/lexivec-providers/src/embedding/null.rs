//! Null embedding provider for testing and development
//!
//! Deterministic, hash-based embeddings with no external dependencies.

use async_trait::async_trait;

use lexivec_domain::constants::DEFAULT_EMBEDDING_DIMENSIONS;
use lexivec_domain::error::Result;
use lexivec_domain::ports::EmbeddingProvider;
use lexivec_domain::value_objects::Embedding;

/// Null embedding provider.
///
/// Returns fixed-size vectors derived from a hash of the input text:
/// the same text always maps to the same vector, different texts map to
/// different vectors. Useful wherever an embedding service is not
/// available or not wanted.
pub struct NullEmbeddingProvider {
    dimensions: usize,
}

impl NullEmbeddingProvider {
    /// Create a provider emitting vectors of the given dimensionality
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for NullEmbeddingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIMENSIONS)
    }
}

#[async_trait]
impl EmbeddingProvider for NullEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let embeddings = texts
            .iter()
            .map(|text| {
                let hash = text
                    .bytes()
                    .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
                let base = (hash % 1000) as f32 / 1000.0;

                let vector = (0..self.dimensions)
                    .map(|i| {
                        let variation = ((i as f32 + base * 100.0) * 0.1).sin();
                        (base + variation * 0.5).clamp(-1.0, 1.0)
                    })
                    .collect();

                Embedding {
                    vector,
                    dimensions: self.dimensions,
                    model: "null".to_string(),
                }
            })
            .collect();

        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeddings_are_deterministic_per_text() {
        let provider = NullEmbeddingProvider::new(16);
        let texts = vec!["alpha".to_string(), "beta".to_string()];

        let first = provider.embed_batch(&texts).await.unwrap();
        let second = provider.embed_batch(&texts).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].vector.len(), 16);
        assert_ne!(first[0].vector, first[1].vector);
    }
}
