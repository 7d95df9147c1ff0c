//! Search index port
//!
//! The central contract of the service: index lifecycle, article storage,
//! and hybrid lexical/vector retrieval against one named index.

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{EmbeddedArticle, IndexSchema, SearchResult};

/// Hybrid Search Index Interface
///
/// One implementation owns one connection to a search engine and one
/// index name. The index moves through a two-state lifecycle:
///
/// ```text
/// Absent --create_index--> Present --remove_index--> Absent
/// ```
///
/// `add_article`, `find_article`, and `search` are only valid in
/// `Present`; in `Absent` they fail with `Error::IndexNotAvailable`
/// rather than a raw engine error. That translation is the one piece of
/// error rewriting an implementation performs; every other engine
/// failure passes through unmodified.
///
/// ## Concurrency
///
/// Implementations are thin, stateless-except-for-connection facades.
/// They impose no internal locking or call sequencing, so an existence
/// check followed by a dependent action is a check-then-act race when
/// another caller concurrently creates or drops the same index. The race
/// is accepted and surfaces as the documented error kinds; at-most-one-
/// winner semantics belong to the engine. No operation retries on
/// transient failure, and none applies its own timeout; callers impose
/// deadlines externally.
///
/// ## Resource handling
///
/// The underlying client is acquired on construction and released when
/// the implementation is dropped, so tying the provider's lifetime to a
/// scope guarantees release on every exit path.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Report whether the named index currently exists.
    ///
    /// # Returns
    /// `Ok(true)` / `Ok(false)` for a definite answer; `Error::Connection`
    /// only when the engine cannot be reached at all.
    async fn index_available(&self) -> Result<bool>;

    /// Create the named index with the given schema.
    ///
    /// # Errors
    /// `Error::IndexCreation` if the index already exists or the engine
    /// rejects the schema.
    async fn create_index(&self, schema: &IndexSchema) -> Result<()>;

    /// Drop the named index and every document in it.
    ///
    /// # Errors
    /// `Error::IndexNotAvailable` if the index does not exist. Callers
    /// wanting drop-then-recreate semantics check `index_available`
    /// first: check, conditionally drop, unconditionally create.
    async fn remove_index(&self) -> Result<()>;

    /// Insert one embedded article.
    ///
    /// The index is checked immediately before the write; a race against
    /// a concurrent drop is possible and intentionally not resolved here.
    ///
    /// # Returns
    /// The engine-assigned document id.
    ///
    /// # Errors
    /// `Error::IndexNotAvailable` if the index is absent at call time.
    async fn add_article(&self, article: &EmbeddedArticle) -> Result<String>;

    /// Fetch one stored article by id, vectors included.
    ///
    /// Reconstruction is strict: a stored payload missing any of the six
    /// fields fails with `Error::MalformedDocument`, never a silent
    /// default.
    ///
    /// # Errors
    /// `Error::IndexNotAvailable` if the index is absent;
    /// `Error::DocumentNotFound` if the id does not resolve.
    async fn find_article(&self, id: &str) -> Result<EmbeddedArticle>;

    /// Run a hybrid query and return relevance-ranked projections.
    ///
    /// The lexical channel always runs: a multi-field match over the
    /// three text fields, each weighted by its boost, with the
    /// configured fuzzy tolerance. The vector channel runs only when
    /// `query_vector` is supplied: a nearest-neighbor lookup per
    /// embedding field, each with its own boost. The engine sums the two
    /// channels' per-document contributions into one fused score and
    /// orders results by it, descending. Embedding fields are excluded
    /// from every returned payload.
    ///
    /// # Returns
    /// Possibly-empty ranked results; an empty index or a query with no
    /// matches yields `Ok(vec![])`, not an error.
    ///
    /// # Errors
    /// `Error::IndexNotAvailable` if the index is absent.
    async fn search(
        &self,
        query: &str,
        query_vector: Option<&[f32]>,
    ) -> Result<Vec<SearchResult>>;

    /// Identifier of this implementation (e.g. "elasticsearch", "memory")
    fn provider_name(&self) -> &str;
}
