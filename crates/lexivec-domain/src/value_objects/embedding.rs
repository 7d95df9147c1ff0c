//! Semantic Embedding Value Object

use serde::{Deserialize, Serialize};

/// Value Object: Semantic Text Embedding
///
/// A dense-vector representation of one text, produced by an embedding
/// provider and compared via cosine similarity.
///
/// ## Business Rules
///
/// - `dimensions` equals `vector.len()` and is positive
/// - All embeddings stored in one index share the same dimensionality
/// - `model` identifies the generation method for audit purposes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The embedding vector values
    pub vector: Vec<f32>,
    /// Dimensionality of the embedding vector
    pub dimensions: usize,
    /// Name of the model that generated this embedding
    pub model: String,
}
