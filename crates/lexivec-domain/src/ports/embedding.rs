//! Embedding provider port

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::value_objects::Embedding;

/// Text Embedding Interface
///
/// Contract for providers that transform text into dense semantic
/// vectors. The gateway never computes embeddings itself; it only stores
/// and queries what a provider returns. Within one index's lifetime every
/// call is assumed to produce vectors of one fixed dimensionality.
///
/// `embed` has a default implementation delegating to `embed_batch` with
/// a single item; providers only implement `embed_batch` unless they can
/// optimize the single-text case.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the embedding for a single text
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("no embedding returned"))
    }

    /// Get embeddings for multiple texts, in input order
    ///
    /// # Arguments
    /// * `texts` - Texts to embed; one vector is returned per text
    ///
    /// # Returns
    /// One embedding per input text, same order, same dimensionality
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Dimensionality of the vectors this provider produces
    fn dimensions(&self) -> usize;

    /// Identifier of this provider implementation (e.g. "ollama", "null")
    fn provider_name(&self) -> &str;
}
