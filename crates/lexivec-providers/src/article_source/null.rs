//! Null article source for testing and development

use async_trait::async_trait;

use lexivec_domain::error::Result;
use lexivec_domain::ports::ArticleSource;
use lexivec_domain::value_objects::Article;

/// Null article source.
///
/// Produces a deterministic article for any title, so reindex cycles can
/// run without network access.
pub struct NullArticleSource;

impl NullArticleSource {
    /// Create a new null source
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullArticleSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleSource for NullArticleSource {
    async fn fetch_article(&self, title: &str) -> Result<Article> {
        Ok(Article {
            title: title.to_string(),
            summary: format!("Synthetic summary for {}", title),
            content: format!("Synthetic body text describing {} in detail.", title),
        })
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
