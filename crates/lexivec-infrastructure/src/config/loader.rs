//! Configuration loader
//!
//! Merges configuration from defaults, a TOML file, and environment
//! variables using Figment.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::path::{Path, PathBuf};

use lexivec_domain::error::{Error, Result};

use super::AppConfig;

/// Default configuration file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "lexivec.toml";

/// Environment variable prefix; `__` separates nested keys, so
/// `LEXIVEC_SERVER__PORT` maps to `server.port`.
const CONFIG_ENV_PREFIX: &str = "LEXIVEC_";

/// Configuration loader service
#[derive(Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader using the default file location
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set an explicit configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from all sources.
    ///
    /// Sources are merged in order, later overriding earlier:
    /// 1. `AppConfig::default()`
    /// 2. The TOML file (explicit path, or `lexivec.toml` if present)
    /// 3. `LEXIVEC_*` environment variables (`__` nests keys)
    ///
    /// The merged configuration is validated before being returned.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::config(format!(
                        "configuration file '{}' does not exist",
                        path.display()
                    )));
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    figment = figment.merge(Toml::file(default_path));
                }
            }
        }

        figment = figment.merge(Env::prefixed(CONFIG_ENV_PREFIX).split("__"));

        let config: AppConfig = figment.extract().map_err(|e| Error::Config {
            message: "failed to extract configuration".to_string(),
            source: Some(Box::new(e)),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save a configuration to a TOML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let rendered = toml::to_string_pretty(config).map_err(|e| Error::Config {
            message: "failed to serialize configuration".to_string(),
            source: Some(Box::new(e)),
        })?;
        std::fs::write(path.as_ref(), rendered).map_err(|e| Error::Config {
            message: format!("failed to write '{}'", path.as_ref().display()),
            source: Some(Box::new(e)),
        })
    }
}
