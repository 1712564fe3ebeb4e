//! Estimator configuration
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `<config_dir>/housing-estimator/config.yaml` (or an explicit path)
//! 3. `ESTIMATOR_API_URL`
//! 4. Command-line overrides applied by the binaries

use estimator_core::Feature;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Directory name under the platform config/cache dirs
pub const APP_DIR: &str = "housing-estimator";

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "ESTIMATOR_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            timeout_secs: 30,
        }
    }
}

/// Initial values of the curve controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveDefaults {
    pub feature: Feature,
    pub min_value: f64,
    pub max_value: f64,
    pub num_points: i64,
}

impl Default for CurveDefaults {
    fn default() -> Self {
        Self {
            feature: Feature::MedInc,
            min_value: 1.0,
            max_value: 10.0,
            num_points: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub api: ApiConfig,
    pub curve: CurveDefaults,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            curve: CurveDefaults::default(),
            log_filter: "info".into(),
        }
    }
}

impl EstimatorConfig {
    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.yaml"))
    }

    /// Directory for log files
    pub fn log_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// Load from `path`, or from the default location when it exists, then
    /// apply `ESTIMATOR_API_URL` and the command-line `api_url` in that order.
    /// The base URL is validated only once every override is in.
    pub fn load(path: Option<&Path>, api_url: Option<String>) -> Result<Self> {
        let config = Self::load_file(path)?;
        config.with_overrides(std::env::var(API_URL_ENV).ok(), api_url)
    }

    fn load_file(path: Option<&Path>) -> Result<Self> {
        Ok(match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load_from(&default)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        })
    }

    /// Apply the environment URL, then the command-line URL, and validate
    pub fn with_overrides(mut self, env_url: Option<String>, cli_url: Option<String>) -> Result<Self> {
        self.apply_api_url(env_url);
        self.apply_api_url(cli_url);
        self.base_url()?;
        Ok(self)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Replace the base URL when an override is present
    pub fn apply_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Parsed base URL, normalised to end with `/` so endpoint paths join under it
    pub fn base_url(&self) -> Result<Url> {
        let raw = &self.api.base_url;
        let with_slash = if raw.ends_with('/') {
            raw.clone()
        } else {
            format!("{}/", raw)
        };
        Url::parse(&with_slash).map_err(|source| ConfigError::InvalidUrl {
            url: raw.clone(),
            source,
        })
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.api.timeout_secs)
    }
}
