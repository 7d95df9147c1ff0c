//! Value Objects
//!
//! Immutable domain values: articles in their plain and embedded forms,
//! embeddings, the index schema descriptor, and search results.

pub mod article;
pub mod embedding;
pub mod schema;

pub use article::{Article, EmbeddedArticle, SearchResult};
pub use embedding::Embedding;
pub use schema::IndexSchema;
