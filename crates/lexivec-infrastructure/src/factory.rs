//! Provider factories
//!
//! Turn configuration into concrete provider instances. Each factory is
//! called exactly once at process start; the selected variants are then
//! injected into request handlers, so no provider is ever chosen at
//! call time.

use std::sync::Arc;
use std::time::Duration;

use lexivec_domain::error::{Error, Result};
use lexivec_domain::ports::{ArticleSource, EmbeddingProvider, SearchIndexProvider};
use lexivec_providers::article_source::{NullArticleSource, WikipediaArticleSource};
use lexivec_providers::embedding::{NullEmbeddingProvider, OllamaEmbeddingProvider};
use lexivec_providers::search_index::{
    ElasticsearchSearchIndex, EngineConnection, InMemorySearchIndex, SearchTuning,
};

use crate::config::{AppConfig, ConnectionConfig};

/// Build the configured search index provider.
pub fn build_search_index(config: &AppConfig) -> Result<Arc<dyn SearchIndexProvider>> {
    let index = &config.search_index;
    let tuning = SearchTuning {
        fuzziness: index.fuzziness,
        knn_k: index.knn.k,
        knn_num_candidates: index.knn.num_candidates,
    };

    match index.provider.as_str() {
        "elasticsearch" => {
            let connection = engine_connection(&index.connection)?;
            Ok(Arc::new(ElasticsearchSearchIndex::connect(
                &connection,
                index.index_name.clone(),
                tuning,
            )?))
        }
        "memory" => Ok(Arc::new(InMemorySearchIndex::new(
            index.index_name.clone(),
            tuning,
        )?)),
        other => Err(Error::config(format!(
            "unknown search index provider '{}'",
            other
        ))),
    }
}

/// Build the configured embedding provider.
pub fn build_embedding_provider(config: &AppConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let embedding = &config.embedding;
    match embedding.provider.as_str() {
        "ollama" => {
            let timeout = Duration::from_secs(embedding.timeout_secs);
            let client = http_client(timeout)?;
            Ok(Arc::new(OllamaEmbeddingProvider::new(
                embedding.base_url.clone(),
                embedding.model.clone(),
                embedding.dimensions,
                timeout,
                client,
            )))
        }
        "null" => Ok(Arc::new(NullEmbeddingProvider::new(embedding.dimensions))),
        other => Err(Error::config(format!(
            "unknown embedding provider '{}'",
            other
        ))),
    }
}

/// Build the configured article source.
pub fn build_article_source(config: &AppConfig) -> Result<Arc<dyn ArticleSource>> {
    let articles = &config.articles;
    match articles.source.as_str() {
        "wikipedia" => {
            let timeout = Duration::from_secs(articles.timeout_secs);
            let client = http_client(timeout)?;
            Ok(Arc::new(WikipediaArticleSource::new(
                articles.api_url.clone(),
                timeout,
                client,
            )))
        }
        "null" => Ok(Arc::new(NullArticleSource::new())),
        other => Err(Error::config(format!(
            "unknown article source '{}'",
            other
        ))),
    }
}

/// Map connection settings to the engine connection variant.
fn engine_connection(config: &ConnectionConfig) -> Result<EngineConnection> {
    match config.mode.as_str() {
        "local" => Ok(EngineConnection::Local {
            hosts: config.hosts.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }),
        "cloud" => Ok(EngineConnection::Cloud {
            cloud_id: config.cloud_id.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }),
        "url" => Ok(EngineConnection::Url {
            url: config.url.clone(),
        }),
        other => Err(Error::config(format!(
            "unknown engine connection mode '{}'",
            other
        ))),
    }
}

fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Config {
            message: "failed to build HTTP client".to_string(),
            source: Some(Box::new(e)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_provider_is_selectable() {
        let mut config = AppConfig::default();
        config.search_index.provider = "memory".to_string();
        let provider = build_search_index(&config).unwrap();
        assert_eq!(provider.provider_name(), "memory");
    }

    #[test]
    fn unknown_providers_are_config_errors() {
        let mut config = AppConfig::default();
        config.search_index.provider = "sqlite".to_string();
        assert!(matches!(
            build_search_index(&config),
            Err(Error::Config { .. })
        ));

        let mut config = AppConfig::default();
        config.embedding.provider = "sbert".to_string();
        assert!(build_embedding_provider(&config).is_err());

        let mut config = AppConfig::default();
        config.articles.source = "rss".to_string();
        assert!(build_article_source(&config).is_err());
    }

    #[test]
    fn null_providers_are_selectable() {
        let mut config = AppConfig::default();
        config.embedding.provider = "null".to_string();
        config.articles.source = "null".to_string();
        assert_eq!(
            build_embedding_provider(&config).unwrap().provider_name(),
            "null"
        );
        assert_eq!(
            build_article_source(&config).unwrap().provider_name(),
            "null"
        );
    }
}
