//! Lexivec Server
//!
//! The thin HTTP layer over the search gateway:
//!
//! - `POST /search` - embed the query, run the hybrid search, return
//!   ranked `{title, summary, content}` projections
//! - `POST /reindex` - fetch, embed, and index every configured article,
//!   replacing the whole index
//! - `GET /health` - liveness probe
//!
//! Providers are constructed once at startup and injected as managed
//! state; they are released when the server scope ends.

pub mod context;
pub mod handlers;

use rocket::{Build, Rocket, routes};
use tracing::info;

use lexivec_infrastructure::config::AppConfig;
use lexivec_infrastructure::factory;

pub use context::SearchContext;

/// Assemble the Rocket application around a prepared context.
pub fn build_rocket(context: SearchContext) -> Rocket<Build> {
    rocket::build().manage(context).mount(
        "/",
        routes![handlers::search, handlers::reindex, handlers::health],
    )
}

/// Build providers from configuration, start the server, and block
/// until shutdown.
///
/// The providers live in this function's scope: when `launch` returns
/// on shutdown, the context is dropped and the engine connection is
/// released exactly once.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let context = SearchContext::from_config(&config)?;
    info!(
        search_index = context.search_index.provider_name(),
        embedding = context.embedder.provider_name(),
        articles = context.article_source.provider_name(),
        "providers initialized"
    );

    let figment = rocket::Config::figment()
        .merge(("address", config.server.host.clone()))
        .merge(("port", config.server.port));

    build_rocket(context).configure(figment).launch().await?;
    info!("server stopped, engine connection released");
    Ok(())
}

impl SearchContext {
    /// Construct every provider from configuration, once.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            search_index: factory::build_search_index(config)?,
            embedder: factory::build_embedding_provider(config)?,
            article_source: factory::build_article_source(config)?,
            schema: lexivec_domain::value_objects::IndexSchema::new(
                config.embedding.dimensions,
            )?,
            titles: config.articles.titles.clone(),
        })
    }
}
