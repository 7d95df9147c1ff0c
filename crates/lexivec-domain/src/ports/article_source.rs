//! Article source port

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::Article;

/// Article Retrieval Interface
///
/// Contract for suppliers of raw articles. The search side treats a
/// source as an opaque producer invoked once per reindex cycle; how an
/// implementation obtains its text (remote API, fixtures, files) is its
/// own concern.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch one article by title
    ///
    /// # Arguments
    /// * `title` - Selection criterion, typically an exact article title
    ///
    /// # Returns
    /// The article's three text fields, or `Error::ArticleSource` when
    /// the title does not resolve or the source fails
    async fn fetch_article(&self, title: &str) -> Result<Article>;

    /// Identifier of this source implementation (e.g. "wikipedia", "null")
    fn provider_name(&self) -> &str;
}
