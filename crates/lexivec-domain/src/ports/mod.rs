//! Provider Ports
//!
//! Contracts for the external collaborators the domain depends on.
//! Adapter crates implement these; the server wires concrete
//! implementations once at startup and injects them into request
//! handlers.
//!
//! | Port | Description |
//! |------|-------------|
//! | `SearchIndexProvider` | Index lifecycle, storage, and hybrid search |
//! | `EmbeddingProvider` | Text to dense-vector conversion |
//! | `ArticleSource` | Raw article retrieval |

/// Article source port
pub mod article_source;
/// Embedding provider port
pub mod embedding;
/// Search index port
pub mod search_index;

pub use article_source::ArticleSource;
pub use embedding::EmbeddingProvider;
pub use search_index::SearchIndexProvider;
