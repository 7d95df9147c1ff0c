//! Wikipedia article source
//!
//! Fetches articles through the MediaWiki extracts API as plain text:
//! the intro extract becomes the summary, the full extract the content.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use lexivec_domain::error::{Error, Result};
use lexivec_domain::ports::ArticleSource;
use lexivec_domain::value_objects::Article;

use crate::utils::check_and_parse;

/// Wikipedia article source over the MediaWiki action API.
pub struct WikipediaArticleSource {
    api_url: String,
    timeout: Duration,
    http_client: Client,
}

impl WikipediaArticleSource {
    /// Create a new Wikipedia source
    ///
    /// # Arguments
    /// * `api_url` - MediaWiki API endpoint (e.g.
    ///   "https://en.wikipedia.org/w/api.php")
    /// * `timeout` - Per-request timeout
    /// * `http_client` - Reqwest client for API requests
    pub fn new(api_url: String, timeout: Duration, http_client: Client) -> Self {
        Self {
            api_url,
            timeout,
            http_client,
        }
    }

    /// Fetch the plain-text extract of one page.
    ///
    /// `intro_only` limits the extract to the lead section, which is
    /// what the article summary is built from.
    async fn fetch_extract(&self, title: &str, intro_only: bool) -> Result<(String, String)> {
        let mut params = vec![
            ("action", "query"),
            ("format", "json"),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", title),
        ];
        if intro_only {
            params.push(("exintro", "1"));
        }

        let response = self
            .http_client
            .get(&self.api_url)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::article_source(format!("wikipedia request failed: {}", e)))?;

        let body = check_and_parse(response, "wikipedia", Error::article_source).await?;
        let pages = body
            .pointer("/query/pages")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::article_source("wikipedia response is missing pages"))?;
        let page = pages
            .values()
            .next()
            .ok_or_else(|| Error::article_source("wikipedia response contains no page"))?;

        if page.get("missing").is_some() {
            return Err(Error::article_source(format!(
                "article '{}' does not exist",
                title
            )));
        }

        let resolved_title = page
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(title)
            .to_string();
        let extract = page
            .get("extract")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::article_source(format!("article '{}' has no extract", title))
            })?
            .trim()
            .to_string();

        Ok((resolved_title, extract))
    }
}

#[async_trait]
impl ArticleSource for WikipediaArticleSource {
    async fn fetch_article(&self, title: &str) -> Result<Article> {
        let (resolved_title, summary) = self.fetch_extract(title, true).await?;
        let (_, content) = self.fetch_extract(title, false).await?;

        Ok(Article {
            title: resolved_title,
            summary,
            content,
        })
    }

    fn provider_name(&self) -> &str {
        "wikipedia"
    }
}
