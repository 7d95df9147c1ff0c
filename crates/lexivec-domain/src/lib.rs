//! Lexivec Domain Layer
//!
//! Core contracts for the hybrid lexical/vector article search service:
//! entities and value objects, the error taxonomy, and the ports that
//! adapter crates implement (search index, embedding provider, article
//! source).
//!
//! This crate has no I/O of its own. Everything that talks to the network
//! lives behind the traits in [`ports`].

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
