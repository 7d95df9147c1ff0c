//! Shared request-handler state

use std::sync::Arc;

use lexivec_domain::ports::{ArticleSource, EmbeddingProvider, SearchIndexProvider};
use lexivec_domain::value_objects::IndexSchema;

/// Dependencies shared by every request handler.
///
/// Built once at startup from configuration and injected as Rocket
/// managed state; handlers never look providers up ambiently.
pub struct SearchContext {
    /// Gateway to the search engine
    pub search_index: Arc<dyn SearchIndexProvider>,
    /// Embedding provider for queries and articles
    pub embedder: Arc<dyn EmbeddingProvider>,
    /// Supplier of raw articles for reindexing
    pub article_source: Arc<dyn ArticleSource>,
    /// Schema used when (re)creating the index
    pub schema: IndexSchema,
    /// Titles indexed by a reindex cycle
    pub titles: Vec<String>,
}
