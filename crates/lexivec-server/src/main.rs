//! Lexivec - hybrid lexical/vector article search service
//!
//! Loads configuration, initializes logging, wires the configured
//! providers, and serves the HTTP API until shutdown.

use clap::Parser;

use lexivec_infrastructure::config::loader::ConfigLoader;
use lexivec_infrastructure::logging::init_logging;

/// Command line interface for the Lexivec server
#[derive(Parser, Debug)]
#[command(name = "lexivec")]
#[command(about = "Hybrid lexical/vector article search service")]
#[command(version)]
struct Cli {
    /// Path to the configuration file (default: ./lexivec.toml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;

    init_logging(&config.logging)?;
    lexivec_server::run(config).await
}
