//! Lexivec Infrastructure Layer
//!
//! Cross-cutting concerns: configuration loading and validation
//! (figment: defaults, TOML file, `LEXIVEC_*` environment variables),
//! structured logging initialization (tracing), and the factories that
//! turn configuration into concrete provider instances exactly once at
//! process start.

pub mod config;
pub mod factory;
pub mod logging;

pub use config::loader::ConfigLoader;
pub use config::AppConfig;
