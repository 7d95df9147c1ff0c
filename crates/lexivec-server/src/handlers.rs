//! HTTP request handlers

use rocket::http::Status;
use rocket::response::{Responder, status};
use rocket::serde::json::Json;
use rocket::{Request, State, get, post};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use lexivec_domain::error::Error;
use lexivec_domain::value_objects::{EmbeddedArticle, SearchResult};

use crate::context::SearchContext;

/// Advisory body returned when the index has not been built yet
pub const INDEX_UNAVAILABLE_ADVISORY: &str =
    "Search index is not available. POST /reindex to build it.";

/// Search request payload
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,
}

/// Reindex response payload
#[derive(Debug, Serialize)]
pub struct ReindexResponse {
    /// Number of articles indexed
    pub indexed: usize,
}

/// Health response payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: &'static str,
}

/// Error responder for the HTTP boundary.
///
/// A missing index maps to 503 with remediation text; every other
/// gateway error surfaces as a 500.
pub enum ApiError {
    /// Index absent - recoverable via POST /reindex
    Unavailable(String),
    /// Any other failure
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        match error {
            Error::IndexNotAvailable { .. } => {
                Self::Unavailable(INDEX_UNAVAILABLE_ADVISORY.to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let (code, body) = match self {
            Self::Unavailable(body) => (Status::ServiceUnavailable, body),
            Self::Internal(body) => {
                error!("request failed: {}", body);
                (Status::InternalServerError, body)
            }
        };
        status::Custom(code, body).respond_to(request)
    }
}

/// Hybrid search over the article index.
///
/// The query is embedded first, so both retrieval channels run; results
/// carry only the three text fields.
#[post("/search", format = "json", data = "<request>")]
pub async fn search(
    context: &State<SearchContext>,
    request: Json<SearchRequest>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let embedding = context.embedder.embed(&request.query).await?;
    let results = context
        .search_index
        .search(&request.query, Some(&embedding.vector))
        .await?;
    Ok(Json(results))
}

/// Rebuild the whole index from the configured titles.
///
/// Drop-if-present, create, then add article by article. The cycle is
/// not transactional: a failure partway through returns an error and
/// leaves the partially populated index in place; running reindex again
/// replaces it.
#[post("/reindex")]
pub async fn reindex(
    context: &State<SearchContext>,
) -> Result<Json<ReindexResponse>, ApiError> {
    let index = &context.search_index;

    if index.index_available().await? {
        index.remove_index().await?;
    }
    index.create_index(&context.schema).await?;

    let mut indexed = 0;
    for title in &context.titles {
        let article = context.article_source.fetch_article(title).await?;
        let embeddings = context
            .embedder
            .embed_batch(&[
                article.title.clone(),
                article.summary.clone(),
                article.content.clone(),
            ])
            .await?;
        let embedded = EmbeddedArticle::from_article(article, embeddings)?;
        index.add_article(&embedded).await?;
        indexed += 1;
    }

    info!(indexed, "reindex complete");
    Ok(Json(ReindexResponse { indexed }))
}

/// Liveness probe
#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
