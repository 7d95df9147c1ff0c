//! Article Value Objects
//!
//! An article passes through three shapes on its way through the system:
//! [`Article`] as fetched from a source, [`EmbeddedArticle`] once vectors
//! have been attached, and [`SearchResult`] as projected back to callers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value_objects::Embedding;

/// Value Object: Source Article
///
/// The three plain-text fields of a document as supplied by an article
/// source. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Article title
    pub title: String,
    /// Short lead-in / introduction text
    pub summary: String,
    /// Full body text
    pub content: String,
}

/// Value Object: Article with Embeddings
///
/// An [`Article`] extended with one dense vector per text field. Produced
/// once by applying an embedding provider to an article, consumed exactly
/// once by an insertion call.
///
/// ## Business Rules
///
/// - All three vectors have identical dimensionality, and that
///   dimensionality is fixed across the whole index's lifetime
/// - The pairing is strict: `title_embedding` is the vector of `title`,
///   never of any other field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddedArticle {
    /// Article title
    pub title: String,
    /// Short lead-in / introduction text
    pub summary: String,
    /// Full body text
    pub content: String,
    /// Dense vector of `title`
    pub title_embedding: Vec<f32>,
    /// Dense vector of `summary`
    pub summary_embedding: Vec<f32>,
    /// Dense vector of `content`
    pub content_embedding: Vec<f32>,
}

impl EmbeddedArticle {
    /// Combine an article with the embeddings of its three text fields.
    ///
    /// The embeddings must be given in field order (title, summary,
    /// content) and must all share one dimensionality.
    ///
    /// # Errors
    ///
    /// `Error::Embedding` if the batch does not contain exactly three
    /// vectors or their dimensionalities disagree.
    pub fn from_article(article: Article, embeddings: Vec<Embedding>) -> Result<Self> {
        let [title_embedding, summary_embedding, content_embedding]: [Embedding; 3] =
            embeddings.try_into().map_err(|got: Vec<Embedding>| {
                Error::embedding(format!(
                    "expected 3 embeddings for an article, got {}",
                    got.len()
                ))
            })?;

        if title_embedding.vector.len() != summary_embedding.vector.len()
            || summary_embedding.vector.len() != content_embedding.vector.len()
        {
            return Err(Error::embedding(format!(
                "article embeddings disagree on dimensionality: {}/{}/{}",
                title_embedding.vector.len(),
                summary_embedding.vector.len(),
                content_embedding.vector.len()
            )));
        }

        Ok(Self {
            title: article.title,
            summary: article.summary,
            content: article.content,
            title_embedding: title_embedding.vector,
            summary_embedding: summary_embedding.vector,
            content_embedding: content_embedding.vector,
        })
    }

    /// Dimensionality of the attached vectors
    pub fn dimensions(&self) -> usize {
        self.title_embedding.len()
    }
}

/// Value Object: Ranked Search Result
///
/// Projection of a stored article containing only the three text fields.
/// Embedding vectors are never returned to a caller. Ordering within a
/// result sequence is by descending fused relevance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Article title
    pub title: String,
    /// Short lead-in / introduction text
    pub summary: String,
    /// Full body text
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedding(vector: Vec<f32>) -> Embedding {
        Embedding {
            dimensions: vector.len(),
            vector,
            model: "test".to_string(),
        }
    }

    #[test]
    fn from_article_pairs_vectors_with_their_fields() {
        let article = Article {
            title: "t".to_string(),
            summary: "s".to_string(),
            content: "c".to_string(),
        };
        let embedded = EmbeddedArticle::from_article(
            article,
            vec![
                embedding(vec![1.0, 0.0]),
                embedding(vec![0.0, 1.0]),
                embedding(vec![1.0, 1.0]),
            ],
        )
        .unwrap();

        assert_eq!(embedded.title_embedding, vec![1.0, 0.0]);
        assert_eq!(embedded.summary_embedding, vec![0.0, 1.0]);
        assert_eq!(embedded.content_embedding, vec![1.0, 1.0]);
        assert_eq!(embedded.dimensions(), 2);
    }

    #[test]
    fn from_article_rejects_wrong_count() {
        let article = Article {
            title: "t".to_string(),
            summary: "s".to_string(),
            content: "c".to_string(),
        };
        let err = EmbeddedArticle::from_article(article, vec![embedding(vec![1.0])]).unwrap_err();
        assert!(matches!(err, Error::Embedding { .. }));
    }

    #[test]
    fn from_article_rejects_mixed_dimensionality() {
        let article = Article {
            title: "t".to_string(),
            summary: "s".to_string(),
            content: "c".to_string(),
        };
        let err = EmbeddedArticle::from_article(
            article,
            vec![
                embedding(vec![1.0, 0.0]),
                embedding(vec![0.0]),
                embedding(vec![1.0, 1.0]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Embedding { .. }));
    }
}
