//! Elasticsearch search index gateway
//!
//! A thin REST client over one Elasticsearch-compatible index. The
//! engine owns storage, lexical analysis, nearest-neighbor search, and
//! score fusion; this gateway owns the index schema, the hybrid query
//! construction, and the translation of "missing index" responses into
//! the typed error kinds. Every other engine failure passes through
//! unmodified, and nothing is retried.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use tracing::debug;

use lexivec_domain::constants::{
    BOOST_CONTENT, BOOST_CONTENT_EMBEDDING, BOOST_SUMMARY, BOOST_SUMMARY_EMBEDDING, BOOST_TITLE,
    BOOST_TITLE_EMBEDDING, EMBEDDING_FIELDS_GLOB, FIELD_CONTENT, FIELD_CONTENT_EMBEDDING,
    FIELD_SUMMARY, FIELD_SUMMARY_EMBEDDING, FIELD_TITLE, FIELD_TITLE_EMBEDDING,
};
use lexivec_domain::error::{Error, Result};
use lexivec_domain::ports::SearchIndexProvider;
use lexivec_domain::value_objects::{EmbeddedArticle, IndexSchema, SearchResult};

use super::connection::EngineConnection;
use super::SearchTuning;
use crate::constants::DEFAULT_HTTP_TIMEOUT;

/// Engine error type reported when the target index does not exist
const INDEX_NOT_FOUND_EXCEPTION: &str = "index_not_found_exception";

/// Engine error type reported when the target index already exists
const ALREADY_EXISTS_EXCEPTION: &str = "resource_already_exists_exception";

/// Elasticsearch gateway over one named index.
///
/// Holds a single HTTP client for its whole lifetime; the client is
/// released when the gateway is dropped. The gateway performs no
/// pooling, multiplexing, or operation-level timeouts of its own beyond
/// the client-wide request timeout.
pub struct ElasticsearchSearchIndex {
    http: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    index_name: String,
    tuning: SearchTuning,
}

impl ElasticsearchSearchIndex {
    /// Build a gateway from a connection variant.
    ///
    /// Resolves the connection once and constructs the HTTP client; no
    /// network traffic happens until the first operation.
    ///
    /// # Arguments
    /// * `connection` - Deployment variant resolved to URL + credentials
    /// * `index_name` - The one index this gateway addresses
    /// * `tuning` - Query-time fuzziness and kNN parameters
    ///
    /// # Errors
    /// `Error::InvalidArgument` for bad tuning, `Error::Config` for an
    /// unresolvable connection, `Error::Connection` if the HTTP client
    /// cannot be constructed.
    pub fn connect(
        connection: &EngineConnection,
        index_name: impl Into<String>,
        tuning: SearchTuning,
    ) -> Result<Self> {
        tuning.validate()?;
        let resolved = connection.resolve()?;
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::connection_with_source("failed to build HTTP client", e))?;

        Ok(Self {
            http,
            base_url: resolved.base_url,
            username: resolved.username,
            password: resolved.password,
            index_name: index_name.into(),
            tuning,
        })
    }

    /// Index name this gateway addresses
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.http.request(method, url);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }
        request
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        request
            .send()
            .await
            .map_err(|e| Error::connection_with_source("engine request failed", e))
    }

    async fn ensure_available(&self) -> Result<()> {
        if self.index_available().await? {
            Ok(())
        } else {
            Err(Error::index_not_available(&self.index_name))
        }
    }

    /// Render the schema descriptor as an engine mapping body.
    ///
    /// Text fields are analyzed and searchable; embedding fields are
    /// cosine-metric dense vectors indexed for nearest-neighbor search.
    fn mapping_body(schema: &IndexSchema) -> Value {
        let dense_vector = |dims: usize| {
            json!({
                "type": "dense_vector",
                "dims": dims,
                "index": true,
                "similarity": "cosine",
            })
        };
        json!({
            "mappings": {
                "properties": {
                    FIELD_TITLE: { "type": "text" },
                    FIELD_SUMMARY: { "type": "text" },
                    FIELD_CONTENT: { "type": "text" },
                    FIELD_TITLE_EMBEDDING: dense_vector(schema.vector_dimensions),
                    FIELD_SUMMARY_EMBEDDING: dense_vector(schema.vector_dimensions),
                    FIELD_CONTENT_EMBEDDING: dense_vector(schema.vector_dimensions),
                }
            }
        })
    }

    /// Build the hybrid query body.
    ///
    /// The lexical channel is a boosted multi-field match with the
    /// configured fuzziness. The vector channel is emitted only when a
    /// query vector is present: one kNN clause per embedding field, each
    /// carrying its own boost, `k`, and candidate pool size. The engine
    /// sums both channels into the fused `_score`; embedding fields are
    /// excluded from every returned source payload.
    fn search_body(&self, query: &str, query_vector: Option<&[f32]>) -> Value {
        let mut body = json!({
            "query": {
                "multi_match": {
                    "query": query,
                    "fields": [
                        format!("{}^{}", FIELD_TITLE, BOOST_TITLE),
                        format!("{}^{}", FIELD_SUMMARY, BOOST_SUMMARY),
                        format!("{}^{}", FIELD_CONTENT, BOOST_CONTENT),
                    ],
                    "fuzziness": self.tuning.fuzziness,
                }
            },
            "_source": {
                "excludes": [EMBEDDING_FIELDS_GLOB],
            }
        });

        if let Some(vector) = query_vector {
            let knn_clause = |field: &str, boost: f32| {
                json!({
                    "field": field,
                    "query_vector": vector,
                    "k": self.tuning.knn_k,
                    "num_candidates": self.tuning.knn_num_candidates,
                    "boost": boost,
                })
            };
            body["knn"] = json!([
                knn_clause(FIELD_TITLE_EMBEDDING, BOOST_TITLE_EMBEDDING),
                knn_clause(FIELD_SUMMARY_EMBEDDING, BOOST_SUMMARY_EMBEDDING),
                knn_clause(FIELD_CONTENT_EMBEDDING, BOOST_CONTENT_EMBEDDING),
            ]);
        }

        body
    }

    /// Strict reconstruction of a stored article from a `_source` payload.
    ///
    /// Every one of the six fields must be present and well-typed; a
    /// missing field is index/schema drift and fails hard.
    fn article_from_source(source: &Value) -> Result<EmbeddedArticle> {
        Ok(EmbeddedArticle {
            title: str_field(source, FIELD_TITLE)?,
            summary: str_field(source, FIELD_SUMMARY)?,
            content: str_field(source, FIELD_CONTENT)?,
            title_embedding: vector_field(source, FIELD_TITLE_EMBEDDING)?,
            summary_embedding: vector_field(source, FIELD_SUMMARY_EMBEDDING)?,
            content_embedding: vector_field(source, FIELD_CONTENT_EMBEDDING)?,
        })
    }

    /// Strict projection of a search hit `_source` (vectors already
    /// excluded by the query).
    fn result_from_source(source: &Value) -> Result<SearchResult> {
        Ok(SearchResult {
            title: str_field(source, FIELD_TITLE)?,
            summary: str_field(source, FIELD_SUMMARY)?,
            content: str_field(source, FIELD_CONTENT)?,
        })
    }
}

#[async_trait]
impl SearchIndexProvider for ElasticsearchSearchIndex {
    async fn index_available(&self) -> Result<bool> {
        let response = self
            .send(self.request(Method::HEAD, &self.index_name))
            .await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(Error::connection(format!(
                "unexpected status {} from index existence check",
                status.as_u16()
            ))),
        }
    }

    async fn create_index(&self, schema: &IndexSchema) -> Result<()> {
        debug!(index = %self.index_name, dims = schema.vector_dimensions, "creating index");
        let response = self
            .send(
                self.request(Method::PUT, &self.index_name)
                    .json(&Self::mapping_body(schema)),
            )
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if body.contains(ALREADY_EXISTS_EXCEPTION) {
            return Err(Error::index_creation(format!(
                "index '{}' already exists",
                self.index_name
            )));
        }
        Err(Error::index_creation(format!(
            "engine rejected index '{}': {}",
            self.index_name, body
        )))
    }

    async fn remove_index(&self) -> Result<()> {
        debug!(index = %self.index_name, "removing index");
        let response = self
            .send(self.request(Method::DELETE, &self.index_name))
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(Error::index_not_available(&self.index_name)),
            status => Err(Error::connection(format!(
                "unexpected status {} removing index '{}'",
                status.as_u16(),
                self.index_name
            ))),
        }
    }

    async fn add_article(&self, article: &EmbeddedArticle) -> Result<String> {
        self.ensure_available().await?;

        let path = format!("{}/_doc", self.index_name);
        let response = self
            .send(self.request(Method::POST, &path).json(article))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            // Lost the race against a concurrent drop.
            return Err(Error::index_not_available(&self.index_name));
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::connection(format!(
                "engine rejected document ({}): {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::connection_with_source("invalid index response", e))?;
        body.get("_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::connection("index response is missing _id"))
    }

    async fn find_article(&self, id: &str) -> Result<EmbeddedArticle> {
        self.ensure_available().await?;

        let path = format!("{}/_doc/{}", self.index_name, id);
        let response = self.send(self.request(Method::GET, &path)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            if body.contains(INDEX_NOT_FOUND_EXCEPTION) {
                return Err(Error::index_not_available(&self.index_name));
            }
            return Err(Error::document_not_found(id));
        }
        if !response.status().is_success() {
            return Err(Error::connection(format!(
                "unexpected status {} fetching document '{}'",
                response.status().as_u16(),
                id
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::connection_with_source("invalid document response", e))?;
        let source = body
            .get("_source")
            .ok_or_else(|| Error::connection("document response is missing _source"))?;
        Self::article_from_source(source)
    }

    async fn search(
        &self,
        query: &str,
        query_vector: Option<&[f32]>,
    ) -> Result<Vec<SearchResult>> {
        self.ensure_available().await?;

        debug!(
            index = %self.index_name,
            with_vector = query_vector.is_some(),
            "running hybrid search"
        );
        let path = format!("{}/_search", self.index_name);
        let response = self
            .send(
                self.request(Method::POST, &path)
                    .json(&self.search_body(query, query_vector)),
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::index_not_available(&self.index_name));
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::connection(format!(
                "search failed ({}): {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::connection_with_source("invalid search response", e))?;
        let hits = body
            .pointer("/hits/hits")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::connection("search response is missing hits"))?;

        hits.iter()
            .map(|hit| {
                let source = hit
                    .get("_source")
                    .ok_or_else(|| Error::connection("search hit is missing _source"))?;
                Self::result_from_source(source)
            })
            .collect()
    }

    fn provider_name(&self) -> &str {
        "elasticsearch"
    }
}

fn str_field(source: &Value, field: &str) -> Result<String> {
    source
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::malformed_document(field))
}

fn vector_field(source: &Value, field: &str) -> Result<Vec<f32>> {
    source
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::malformed_document(field))?
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| Error::malformed_document(field))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> ElasticsearchSearchIndex {
        ElasticsearchSearchIndex::connect(
            &EngineConnection::Local {
                hosts: vec!["http://localhost:9200".to_string()],
                username: "elastic".to_string(),
                password: "secret".to_string(),
            },
            "articles",
            SearchTuning::default(),
        )
        .unwrap()
    }

    #[test]
    fn mapping_declares_all_six_fields() {
        let schema = IndexSchema::new(512).unwrap();
        let mapping = ElasticsearchSearchIndex::mapping_body(&schema);
        let properties = mapping.pointer("/mappings/properties").unwrap();

        for field in [FIELD_TITLE, FIELD_SUMMARY, FIELD_CONTENT] {
            assert_eq!(properties[field]["type"], "text");
        }
        for field in [
            FIELD_TITLE_EMBEDDING,
            FIELD_SUMMARY_EMBEDDING,
            FIELD_CONTENT_EMBEDDING,
        ] {
            assert_eq!(properties[field]["type"], "dense_vector");
            assert_eq!(properties[field]["dims"], 512);
            assert_eq!(properties[field]["similarity"], "cosine");
            assert_eq!(properties[field]["index"], true);
        }
    }

    #[test]
    fn lexical_only_query_has_no_knn_clause() {
        let body = gateway().search_body("semantic search", None);
        assert!(body.get("knn").is_none());
        assert_eq!(
            body.pointer("/query/multi_match/query").unwrap(),
            "semantic search"
        );
        assert_eq!(
            body.pointer("/_source/excludes/0").unwrap(),
            EMBEDDING_FIELDS_GLOB
        );
    }

    #[test]
    fn hybrid_query_carries_boosted_knn_per_embedding_field() {
        let vector = vec![0.5_f32; 4];
        let body = gateway().search_body("semantic search", Some(&vector));
        let knn = body.get("knn").and_then(Value::as_array).unwrap();
        assert_eq!(knn.len(), 3);
        assert_eq!(knn[0]["field"], FIELD_TITLE_EMBEDDING);
        assert_eq!(knn[0]["k"], 5);
        assert_eq!(knn[0]["num_candidates"], 10);
        assert_eq!(knn[1]["boost"], 2.0);
    }

    #[test]
    fn fields_carry_boost_suffixes() {
        let body = gateway().search_body("q", None);
        let fields = body
            .pointer("/query/multi_match/fields")
            .and_then(Value::as_array)
            .unwrap();
        assert_eq!(fields[0], "title^4");
        assert_eq!(fields[1], "summary^2");
        assert_eq!(fields[2], "content^1");
    }

    #[test]
    fn reconstruction_fails_on_missing_field() {
        let source = serde_json::json!({
            "title": "t",
            "summary": "s",
            "content": "c",
            "title_embedding": [0.1],
            "content_embedding": [0.3],
        });
        let err = ElasticsearchSearchIndex::article_from_source(&source).unwrap_err();
        assert!(
            matches!(err, Error::MalformedDocument { ref field } if field == FIELD_SUMMARY_EMBEDDING)
        );
    }
}
