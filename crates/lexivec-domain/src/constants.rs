//! Domain-wide constants
//!
//! Field names, the boost table, and the default search tuning shared by
//! every search-index implementation.

/// Default index name for article storage
pub const DEFAULT_INDEX_NAME: &str = "articles";

/// Default dimensionality of article embeddings
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 512;

/// Title text field
pub const FIELD_TITLE: &str = "title";
/// Summary text field
pub const FIELD_SUMMARY: &str = "summary";
/// Content text field
pub const FIELD_CONTENT: &str = "content";
/// Title embedding field
pub const FIELD_TITLE_EMBEDDING: &str = "title_embedding";
/// Summary embedding field
pub const FIELD_SUMMARY_EMBEDDING: &str = "summary_embedding";
/// Content embedding field
pub const FIELD_CONTENT_EMBEDDING: &str = "content_embedding";

/// Glob matching every embedding field, used to exclude vectors from
/// search responses
pub const EMBEDDING_FIELDS_GLOB: &str = "*_embedding";

/// Boost applied to lexical matches on the title field
pub const BOOST_TITLE: f32 = 4.0;
/// Boost applied to lexical matches on the summary field
pub const BOOST_SUMMARY: f32 = 2.0;
/// Boost applied to lexical matches on the content field
pub const BOOST_CONTENT: f32 = 1.0;
/// Boost applied to nearest-neighbor matches on the title embedding
pub const BOOST_TITLE_EMBEDDING: f32 = 4.0;
/// Boost applied to nearest-neighbor matches on the summary embedding
pub const BOOST_SUMMARY_EMBEDDING: f32 = 2.0;
/// Boost applied to nearest-neighbor matches on the content embedding
pub const BOOST_CONTENT_EMBEDDING: f32 = 1.0;

/// Maximum tolerated edit distance for fuzzy lexical matching.
///
/// 0 disables fuzzy matching entirely (strict mode).
pub const MAX_FUZZINESS: u8 = 2;

/// Default fuzzy-match tolerance
pub const DEFAULT_FUZZINESS: u8 = 2;

/// Default number of nearest neighbors returned per vector field
pub const DEFAULT_KNN_K: usize = 5;

/// Default approximate-search candidate pool size.
///
/// Must be >= k; larger pools improve recall at higher latency cost.
pub const DEFAULT_KNN_NUM_CANDIDATES: usize = 10;
