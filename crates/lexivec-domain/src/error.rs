//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Lexivec search service
#[derive(Error, Debug)]
pub enum Error {
    /// A document-level operation was attempted against a missing index.
    ///
    /// Recoverable by the caller: rebuild the index via a reindex cycle.
    #[error("search index '{index}' is not available")]
    IndexNotAvailable {
        /// Name of the missing index
        index: String,
    },

    /// Index creation was rejected, or the index already exists
    #[error("index creation failed: {message}")]
    IndexCreation {
        /// Engine-reported reason for the rejection
        message: String,
    },

    /// The index exists but the requested document id does not resolve
    #[error("document '{id}' not found")]
    DocumentNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// A stored payload is missing an expected field.
    ///
    /// Indicates index/schema drift; not recoverable, propagates as a hard
    /// failure so a document written by this gateway can always be read
    /// back by this gateway.
    #[error("stored document is missing field '{field}'")]
    MalformedDocument {
        /// The absent or mistyped field
        field: String,
    },

    /// Transport-level failure talking to the search engine
    #[error("engine connection error: {message}")]
    Connection {
        /// Description of the transport failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding provider operation error
    #[error("embedding provider error: {message}")]
    Embedding {
        /// Description of the embedding failure
        message: String,
    },

    /// Article source operation error
    #[error("article source error: {message}")]
    ArticleSource {
        /// Description of the source failure
        message: String,
    },

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid argument provided to an operation
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an `IndexNotAvailable` error for the given index name
    pub fn index_not_available<S: Into<String>>(index: S) -> Self {
        Self::IndexNotAvailable {
            index: index.into(),
        }
    }

    /// Create an `IndexCreation` error
    pub fn index_creation<S: Into<String>>(message: S) -> Self {
        Self::IndexCreation {
            message: message.into(),
        }
    }

    /// Create a `DocumentNotFound` error
    pub fn document_not_found<S: Into<String>>(id: S) -> Self {
        Self::DocumentNotFound { id: id.into() }
    }

    /// Create a `MalformedDocument` error for the given field
    pub fn malformed_document<S: Into<String>>(field: S) -> Self {
        Self::MalformedDocument {
            field: field.into(),
        }
    }

    /// Create a `Connection` error without a source
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a `Connection` error wrapping a transport error
    pub fn connection_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an `Embedding` error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create an `ArticleSource` error
    pub fn article_source<S: Into<String>>(message: S) -> Self {
        Self::ArticleSource {
            message: message.into(),
        }
    }

    /// Create a `Config` error without a source
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create an `InvalidArgument` error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
