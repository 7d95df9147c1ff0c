//! Application configuration
//!
//! One explicit configuration struct, constructed once at process start
//! and passed into the factories and the server. Nothing reads ambient
//! global state after startup.

pub mod loader;

use serde::{Deserialize, Serialize};

use lexivec_domain::constants::{
    DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_FUZZINESS, DEFAULT_INDEX_NAME, DEFAULT_KNN_K,
    DEFAULT_KNN_NUM_CANDIDATES, MAX_FUZZINESS,
};
use lexivec_domain::error::{Error, Result};
use lexivec_providers::constants::{
    OLLAMA_DEFAULT_BASE_URL, OLLAMA_DEFAULT_MODEL, WIKIPEDIA_DEFAULT_API_URL,
};

use crate::logging::parse_log_level;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Search index provider settings
    pub search_index: SearchIndexConfig,
    /// Embedding provider settings
    pub embedding: EmbeddingConfig,
    /// Article source settings
    pub articles: ArticlesConfig,
}

impl AppConfig {
    /// Validate cross-field constraints after loading.
    ///
    /// # Errors
    /// `Error::Config` describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        parse_log_level(&self.logging.level)?;
        if self.search_index.fuzziness > MAX_FUZZINESS {
            return Err(Error::config(format!(
                "search_index.fuzziness {} exceeds maximum {}",
                self.search_index.fuzziness, MAX_FUZZINESS
            )));
        }
        if self.search_index.knn.k == 0 {
            return Err(Error::config("search_index.knn.k must be positive"));
        }
        if self.search_index.knn.num_candidates < self.search_index.knn.k {
            return Err(Error::config(format!(
                "search_index.knn.num_candidates {} must be >= k {}",
                self.search_index.knn.num_candidates, self.search_index.knn.k
            )));
        }
        if self.embedding.dimensions == 0 {
            return Err(Error::config("embedding.dimensions must be positive"));
        }
        if self.search_index.index_name.is_empty() {
            return Err(Error::config("search_index.index_name must not be empty"));
        }
        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON-formatted log lines
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Search index provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchIndexConfig {
    /// Provider selection: "elasticsearch" or "memory"
    pub provider: String,
    /// Name of the one index the gateway addresses
    pub index_name: String,
    /// Maximum tolerated edit distance (0 disables fuzzy matching)
    pub fuzziness: u8,
    /// Nearest-neighbor tuning
    pub knn: KnnConfig,
    /// Engine connection settings
    pub connection: ConnectionConfig,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            provider: "elasticsearch".to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            fuzziness: DEFAULT_FUZZINESS,
            knn: KnnConfig::default(),
            connection: ConnectionConfig::default(),
        }
    }
}

/// Nearest-neighbor tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnConfig {
    /// Neighbors returned per vector field
    pub k: usize,
    /// Candidate pool size for the approximate search, >= k
    pub num_candidates: usize,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_KNN_K,
            num_candidates: DEFAULT_KNN_NUM_CANDIDATES,
        }
    }
}

/// Engine connection settings.
///
/// `mode` selects the deployment variant once at startup:
/// "local" uses `hosts` + credentials, "cloud" uses `cloud_id` +
/// credentials, "url" uses a single URL with embedded userinfo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Variant selection: "local", "cloud", or "url"
    pub mode: String,
    /// Engine base URLs for "local"
    pub hosts: Vec<String>,
    /// Basic-auth user for "local" and "cloud"
    pub username: String,
    /// Basic-auth password for "local" and "cloud"
    pub password: String,
    /// Elastic Cloud id for "cloud"
    pub cloud_id: String,
    /// Full engine URL with embedded credentials for "url"
    pub url: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            mode: "local".to_string(),
            hosts: vec!["http://localhost:9200".to_string()],
            username: String::new(),
            password: String::new(),
            cloud_id: String::new(),
            url: String::new(),
        }
    }
}

/// Embedding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider selection: "ollama" or "null"
    pub provider: String,
    /// Embedding server URL (ollama)
    pub base_url: String,
    /// Embedding model name (ollama)
    pub model: String,
    /// Vector dimensionality, constant for one index's lifetime
    pub dimensions: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            base_url: OLLAMA_DEFAULT_BASE_URL.to_string(),
            model: OLLAMA_DEFAULT_MODEL.to_string(),
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            timeout_secs: 30,
        }
    }
}

/// Article source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticlesConfig {
    /// Source selection: "wikipedia" or "null"
    pub source: String,
    /// MediaWiki API endpoint (wikipedia)
    pub api_url: String,
    /// Titles fetched and indexed by a reindex cycle
    pub titles: Vec<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            source: "wikipedia".to_string(),
            api_url: WIKIPEDIA_DEFAULT_API_URL.to_string(),
            titles: Vec::new(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn oversized_fuzziness_is_rejected() {
        let mut config = AppConfig::default();
        config.search_index.fuzziness = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn candidate_pool_must_cover_k() {
        let mut config = AppConfig::default();
        config.search_index.knn.k = 20;
        config.search_index.knn.num_candidates = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let mut config = AppConfig::default();
        config.embedding.dimensions = 0;
        assert!(config.validate().is_err());
    }
}
