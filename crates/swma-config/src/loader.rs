//! Configuration loading from TOML with environment overrides.

use crate::schema::Config;
use std::path::{Path, PathBuf};
use swma_common::SwmaError;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SWMA_CONFIG_PATH";
/// File picked up from the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "swma.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the schema.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// An environment override has an unparseable value.
    #[error("Invalid value '{value}' for environment variable {var}")]
    EnvParseError {
        /// Variable name.
        var: String,
        /// Offending value.
        value: String,
    },
}

impl From<ConfigError> for SwmaError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        Self::config_with_source(message, err)
    }
}

/// Loads a [`Config`] from disk and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads, overrides from the process environment, and validates.
    ///
    /// Resolution order for the file: `explicit`, then `SWMA_CONFIG_PATH`,
    /// then `swma.toml` in the working directory. Built-in defaults are used
    /// when none of these exist.
    pub fn load(explicit: Option<&Path>) -> Result<Config, SwmaError> {
        let env_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let path = Self::resolve_path(explicit, env_path.as_deref());

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        };

        let config = Self::apply_overrides(config, |name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Picks the config file to read, if any.
    ///
    /// An explicit or environment-provided path is returned even when it
    /// does not exist so the read error surfaces.
    pub fn resolve_path(explicit: Option<&Path>, from_env: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit.or(from_env) {
            return Some(path.to_path_buf());
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        fallback.is_file().then_some(fallback)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parses TOML text; missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies `SWMA_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SWMA_SWPC_BASE_URL") {
            config.feeds.swpc_base_url = v;
        }
        if let Some(v) = lookup("SWMA_SDO_BASE_URL") {
            config.feeds.sdo_base_url = v;
        }
        if let Some(v) = lookup("SWMA_SOHO_BASE_URL") {
            config.feeds.soho_base_url = v;
        }
        if let Some(v) = lookup("SWMA_REQUEST_TIMEOUT") {
            config.feeds.request_timeout_secs = Some(parse_env("SWMA_REQUEST_TIMEOUT", &v)?);
        }
        if let Some(v) = lookup("SWMA_GRAPH_WIDTH") {
            config.graph.width = parse_env("SWMA_GRAPH_WIDTH", &v)?;
        }
        if let Some(v) = lookup("SWMA_GRAPH_HEIGHT") {
            config.graph.height = parse_env("SWMA_GRAPH_HEIGHT", &v)?;
        }
        if let Some(v) = lookup("SWMA_OUTPUT_DIR") {
            config.output.directory = PathBuf::from(v);
        }
        if let Some(v) = lookup("SWMA_LOG_LEVEL") {
            config.logging.level = v;
        }
        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvParseError {
        var: var.to_string(),
        value: value.to_string(),
    })
}
