//! Search Index Implementations
//!
//! Two implementations of the `SearchIndexProvider` port:
//!
//! - [`ElasticsearchSearchIndex`] - the production gateway, a thin REST
//!   client that delegates storage, analysis, and score fusion to an
//!   Elasticsearch-compatible engine.
//! - [`InMemorySearchIndex`] - a self-contained engine implementing the
//!   same contract for development and testing.

pub mod connection;
pub mod elasticsearch;
pub mod in_memory;

pub use connection::EngineConnection;
pub use elasticsearch::ElasticsearchSearchIndex;
pub use in_memory::InMemorySearchIndex;

use lexivec_domain::constants::{
    DEFAULT_FUZZINESS, DEFAULT_KNN_K, DEFAULT_KNN_NUM_CANDIDATES, MAX_FUZZINESS,
};
use lexivec_domain::error::{Error, Result};

/// Query-time tuning shared by every search-index implementation.
///
/// Fixed at gateway construction; the same values apply uniformly to
/// every query the gateway issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTuning {
    /// Maximum edit distance tolerated by the lexical channel.
    ///
    /// 0 disables fuzzy matching (strict mode). Capped at
    /// [`MAX_FUZZINESS`].
    pub fuzziness: u8,
    /// Nearest neighbors returned per vector field
    pub knn_k: usize,
    /// Approximate-search candidate pool size, >= `knn_k`
    pub knn_num_candidates: usize,
}

impl SearchTuning {
    /// Validate the tuning parameters.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` when `fuzziness` exceeds the supported
    /// maximum, `knn_k` is zero, or the candidate pool is smaller than
    /// `knn_k`.
    pub fn validate(&self) -> Result<()> {
        if self.fuzziness > MAX_FUZZINESS {
            return Err(Error::invalid_argument(format!(
                "fuzziness {} exceeds maximum {}",
                self.fuzziness, MAX_FUZZINESS
            )));
        }
        if self.knn_k == 0 {
            return Err(Error::invalid_argument("knn k must be positive"));
        }
        if self.knn_num_candidates < self.knn_k {
            return Err(Error::invalid_argument(format!(
                "knn candidate pool {} is smaller than k {}",
                self.knn_num_candidates, self.knn_k
            )));
        }
        Ok(())
    }
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            fuzziness: DEFAULT_FUZZINESS,
            knn_k: DEFAULT_KNN_K,
            knn_num_candidates: DEFAULT_KNN_NUM_CANDIDATES,
        }
    }
}
