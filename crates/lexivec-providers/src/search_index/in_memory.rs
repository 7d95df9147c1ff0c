//! In-memory search index
//!
//! A self-contained engine implementing the full search-index contract
//! for development and testing. Data lives in a concurrent map and is
//! lost on restart. Scoring mirrors the production engine's shape: a
//! boosted fuzzy lexical channel plus a boosted cosine kNN channel,
//! summed per document into one fused score.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use uuid::Uuid;

use lexivec_domain::constants::{
    BOOST_CONTENT, BOOST_CONTENT_EMBEDDING, BOOST_SUMMARY, BOOST_SUMMARY_EMBEDDING, BOOST_TITLE,
    BOOST_TITLE_EMBEDDING,
};
use lexivec_domain::error::{Error, Result};
use lexivec_domain::ports::SearchIndexProvider;
use lexivec_domain::value_objects::{EmbeddedArticle, IndexSchema, SearchResult};

use super::SearchTuning;

struct StoredArticle {
    id: String,
    article: EmbeddedArticle,
}

struct StoredIndex {
    schema: IndexSchema,
    articles: Vec<StoredArticle>,
}

/// In-memory search index provider.
///
/// Keyed by index name so the create/remove lifecycle behaves exactly
/// like the remote engine: document operations against a name that has
/// not been created fail with `Error::IndexNotAvailable`.
pub struct InMemorySearchIndex {
    indices: DashMap<String, StoredIndex>,
    index_name: String,
    tuning: SearchTuning,
}

impl InMemorySearchIndex {
    /// Create a provider addressing `index_name`.
    ///
    /// # Errors
    /// `Error::InvalidArgument` for invalid tuning parameters.
    pub fn new(index_name: impl Into<String>, tuning: SearchTuning) -> Result<Self> {
        tuning.validate()?;
        Ok(Self {
            indices: DashMap::new(),
            index_name: index_name.into(),
            tuning,
        })
    }

    fn lexical_score(&self, query_terms: &[String], article: &EmbeddedArticle) -> f32 {
        let fields = [
            (article.title.as_str(), BOOST_TITLE),
            (article.summary.as_str(), BOOST_SUMMARY),
            (article.content.as_str(), BOOST_CONTENT),
        ];
        fields
            .iter()
            .map(|(text, boost)| field_match_score(query_terms, text, self.tuning.fuzziness) * boost)
            .sum()
    }

    /// Add the vector channel's contributions to `scores`.
    ///
    /// Each embedding field is searched independently: documents are
    /// ranked by cosine similarity, the pool is cut to `num_candidates`,
    /// and the top `k` contribute their boosted similarity to the fused
    /// score, mirroring a per-field approximate kNN lookup.
    fn add_vector_scores(
        &self,
        scores: &mut HashMap<usize, f32>,
        articles: &[StoredArticle],
        query_vector: &[f32],
    ) {
        for (channel, boost) in [
            (VectorChannel::Title, BOOST_TITLE_EMBEDDING),
            (VectorChannel::Summary, BOOST_SUMMARY_EMBEDDING),
            (VectorChannel::Content, BOOST_CONTENT_EMBEDDING),
        ] {
            let mut ranked: Vec<(usize, f32)> = articles
                .iter()
                .enumerate()
                .map(|(i, stored)| {
                    (i, cosine_score(query_vector, channel.embedding_of(&stored.article)))
                })
                .filter(|(_, similarity)| *similarity > 0.0)
                .collect();
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            ranked.truncate(self.tuning.knn_num_candidates);
            ranked.truncate(self.tuning.knn_k);

            for (doc, similarity) in ranked {
                *scores.entry(doc).or_insert(0.0) += similarity * boost;
            }
        }
    }
}

#[derive(Clone, Copy)]
enum VectorChannel {
    Title,
    Summary,
    Content,
}

impl VectorChannel {
    fn embedding_of(self, article: &EmbeddedArticle) -> &[f32] {
        match self {
            Self::Title => &article.title_embedding,
            Self::Summary => &article.summary_embedding,
            Self::Content => &article.content_embedding,
        }
    }
}

#[async_trait]
impl SearchIndexProvider for InMemorySearchIndex {
    async fn index_available(&self) -> Result<bool> {
        Ok(self.indices.contains_key(&self.index_name))
    }

    async fn create_index(&self, schema: &IndexSchema) -> Result<()> {
        if self.indices.contains_key(&self.index_name) {
            return Err(Error::index_creation(format!(
                "index '{}' already exists",
                self.index_name
            )));
        }
        if schema.vector_dimensions == 0 {
            return Err(Error::index_creation(
                "vector dimensionality must be positive",
            ));
        }
        self.indices.insert(
            self.index_name.clone(),
            StoredIndex {
                schema: *schema,
                articles: Vec::new(),
            },
        );
        Ok(())
    }

    async fn remove_index(&self) -> Result<()> {
        self.indices
            .remove(&self.index_name)
            .map(|_| ())
            .ok_or_else(|| Error::index_not_available(&self.index_name))
    }

    async fn add_article(&self, article: &EmbeddedArticle) -> Result<String> {
        let mut index = self
            .indices
            .get_mut(&self.index_name)
            .ok_or_else(|| Error::index_not_available(&self.index_name))?;

        if article.dimensions() != index.schema.vector_dimensions {
            return Err(Error::invalid_argument(format!(
                "article embeddings have {} dimensions, index expects {}",
                article.dimensions(),
                index.schema.vector_dimensions
            )));
        }

        let id = Uuid::new_v4().to_string();
        index.articles.push(StoredArticle {
            id: id.clone(),
            article: article.clone(),
        });
        Ok(id)
    }

    async fn find_article(&self, id: &str) -> Result<EmbeddedArticle> {
        let index = self
            .indices
            .get(&self.index_name)
            .ok_or_else(|| Error::index_not_available(&self.index_name))?;
        index
            .articles
            .iter()
            .find(|stored| stored.id == id)
            .map(|stored| stored.article.clone())
            .ok_or_else(|| Error::document_not_found(id))
    }

    async fn search(
        &self,
        query: &str,
        query_vector: Option<&[f32]>,
    ) -> Result<Vec<SearchResult>> {
        let index = self
            .indices
            .get(&self.index_name)
            .ok_or_else(|| Error::index_not_available(&self.index_name))?;

        let query_terms = tokenize(query);
        let mut scores: HashMap<usize, f32> = HashMap::new();

        for (doc, stored) in index.articles.iter().enumerate() {
            let lexical = self.lexical_score(&query_terms, &stored.article);
            if lexical > 0.0 {
                scores.insert(doc, lexical);
            }
        }

        if let Some(vector) = query_vector {
            self.add_vector_scores(&mut scores, &index.articles, vector);
        }

        let mut ranked: Vec<(usize, f32)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(ranked
            .into_iter()
            .map(|(doc, _)| {
                let article = &index.articles[doc].article;
                SearchResult {
                    title: article.title.clone(),
                    summary: article.summary.clone(),
                    content: article.content.clone(),
                }
            })
            .collect())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fraction of query terms matched in `text`, tolerating up to
/// `fuzziness` edits per term. Fuzziness 0 is strict equality.
fn field_match_score(query_terms: &[String], text: &str, fuzziness: u8) -> f32 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let field_terms = tokenize(text);
    let matched = query_terms
        .iter()
        .filter(|term| {
            field_terms.iter().any(|candidate| {
                if fuzziness == 0 {
                    candidate == *term
                } else {
                    levenshtein(term, candidate) <= usize::from(fuzziness)
                }
            })
        })
        .count();
    matched as f32 / query_terms.len() as f32
}

/// Cosine similarity rescaled to `(1 + cos) / 2`, the engine's
/// normalization for cosine-metric dense vectors. Dimension mismatches
/// and zero vectors contribute nothing instead of failing the query.
fn cosine_score(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (1.0 + dot / (norm_a * norm_b)) / 2.0
}

/// Levenshtein edit distance over characters.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("kitten", "kitten"), 0);
        assert_eq!(levenshtein("kitten", "sitten"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn tokenize_lowercases_and_splits() {
        assert_eq!(tokenize("Semantic search!"), vec!["semantic", "search"]);
        assert!(tokenize("  ,. ").is_empty());
    }

    #[test]
    fn cosine_score_handles_degenerate_vectors() {
        assert_eq!(cosine_score(&[], &[]), 0.0);
        assert_eq!(cosine_score(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_score(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        let identical = cosine_score(&[1.0, 2.0], &[1.0, 2.0]);
        assert!((identical - 1.0).abs() < 1e-6);
        let opposite = cosine_score(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!(opposite.abs() < 1e-6);
    }

    #[test]
    fn strict_matching_requires_exact_terms() {
        let terms = tokenize("semantik");
        assert_eq!(field_match_score(&terms, "semantic search", 0), 0.0);
        assert!(field_match_score(&terms, "semantic search", 2) > 0.0);
    }
}
