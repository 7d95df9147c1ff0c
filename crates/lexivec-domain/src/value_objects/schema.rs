//! Index Schema Descriptor

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EMBEDDING_DIMENSIONS;
use crate::error::{Error, Result};

/// Value Object: Index Schema
///
/// Declares, for each of the six article fields, its engine-level
/// treatment: the three text fields are lexically analyzed and
/// searchable; the three embedding fields are stored as fixed-dimension
/// dense vectors with a cosine-similarity metric, indexed for
/// nearest-neighbor search. Pure declaration; how the declaration is
/// rendered (e.g. an Elasticsearch mapping body) is up to each engine
/// adapter.
///
/// Passed unchanged to index creation and never mutated afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexSchema {
    /// Dimensionality of every dense-vector field in the index
    pub vector_dimensions: usize,
}

impl IndexSchema {
    /// Create a schema descriptor for the given vector dimensionality.
    ///
    /// # Errors
    ///
    /// `Error::IndexCreation` if `vector_dimensions` is zero.
    pub fn new(vector_dimensions: usize) -> Result<Self> {
        if vector_dimensions == 0 {
            return Err(Error::index_creation(
                "vector dimensionality must be positive",
            ));
        }
        Ok(Self { vector_dimensions })
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self {
            vector_dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}
