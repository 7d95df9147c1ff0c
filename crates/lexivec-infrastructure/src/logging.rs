//! Structured logging with tracing
//!
//! Centralized logging configuration using the tracing ecosystem,
//! initialized once in `main` from `LoggingConfig`.

use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use lexivec_domain::error::{Error, Result};

use crate::config::LoggingConfig;

/// Initialize logging with the provided configuration.
///
/// The `LEXIVEC_LOG` environment variable overrides the configured
/// level with a full EnvFilter directive when set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env("LEXIVEC_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    // The layer types differ between formats, hence two branches.
    if config.json_format {
        let stdout = fmt::layer().json().with_target(true);
        Registry::default().with(filter).with(stdout).init();
    } else {
        let stdout = fmt::layer().with_target(true);
        Registry::default().with(filter).with(stdout).init();
    }

    info!("logging initialized with level: {}", level);
    Ok(())
}

/// Parse a log level string to a tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::config(format!(
            "invalid log level: {}. Use trace, debug, info, warn, or error",
            level
        ))),
    }
}
