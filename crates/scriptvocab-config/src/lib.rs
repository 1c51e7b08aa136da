use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::store::StoreConfig;
use self::translator::TranslatorConfig;

pub mod auth;
pub mod store;
pub mod translator;

pub use store::StoreBackend;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                key: "LOG_FORMAT",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub log_format: LogFormat,
}

impl Config {
    /// Build from process environment
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults for
    /// missing or unparsable values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Config::default();

        config.translator.api_url = non_empty("API_URL");
        if let Some(timeout) = non_empty("REQUEST_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            config.translator.timeout_seconds = timeout;
            config.store.timeout_seconds = timeout;
        }

        config.store.backend = non_empty("STORE_BACKEND")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        if let Some(dir) = non_empty("DATA_DIR") {
            config.store.data_dir = PathBuf::from(dir);
        }
        config.store.base_url = non_empty("STORE_URL");
        config.store.api_token = non_empty("STORE_TOKEN");

        config.auth.default_user = non_empty("SCRIPTVOCAB_USER");

        config.log_format = non_empty("LOG_FORMAT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        config
    }

    /// Load a JSON config file; absent sections take their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
