//! Configuration management for the Things gateway

pub mod file;

use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;
use secrecy::SecretString;

use crate::resolve::{DEFAULT_ATTRIBUTE, SynonymTable};
use crate::things::DEFAULT_TIMEOUT;
use file::ThingsConfigFile;

/// Things gateway configuration
#[derive(Debug)]
pub struct Config {
    /// Things gateway base URL
    /// Set via `THINGS_HOST` env var
    pub host: Option<String>,

    /// Bearer token for the Things API
    /// Set via `THINGS_TOKEN` env var
    pub token: Option<SecretString>,

    /// Request timeout
    pub timeout: Duration,

    /// Synonym sets used to derive alternate device names
    pub synonyms: SynonymTable,

    /// Property assumed when a request names none
    pub default_attribute: String,

    /// Nickname → registry name, in file order
    pub nicknames: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            synonyms: SynonymTable::default(),
            default_attribute: DEFAULT_ATTRIBUTE.to_string(),
            nicknames: IndexMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment
    ///
    /// The file is read from `THINGS_CONFIG` if set, otherwise from
    /// `~/.config/omni/things/config.toml`. Environment variables override
    /// file values
    #[must_use]
    pub fn load() -> Self {
        let path = std::env::var("THINGS_CONFIG")
            .ok()
            .map(PathBuf::from)
            .or_else(file::config_file_path);

        let config_file = path
            .as_deref()
            .map(file::load_config_file)
            .unwrap_or_default();

        Self::from_sources(config_file, |key| std::env::var(key).ok())
    }

    /// Merge a config file with environment lookups
    ///
    /// Priority: env → file → defaults
    #[must_use]
    pub fn from_sources(
        config_file: ThingsConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let defaults = Self::default();
        let ThingsConfigFile {
            gateway,
            matching,
            nicknames,
        } = config_file;

        let host = env("THINGS_HOST").or(gateway.host);
        let token = env("THINGS_TOKEN")
            .or(gateway.token)
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        let timeout = env("THINGS_TIMEOUT_SECS")
            .and_then(|s| match s.parse() {
                Ok(secs) => Some(secs),
                Err(e) => {
                    tracing::warn!(value = %s, error = %e, "ignoring invalid THINGS_TIMEOUT_SECS");
                    None
                }
            })
            .or(gateway.timeout_secs)
            .map_or(defaults.timeout, Duration::from_secs);

        let synonyms = matching
            .synonyms
            .map_or(defaults.synonyms, SynonymTable::from);

        let default_attribute = env("THINGS_DEFAULT_ATTRIBUTE")
            .or(matching.default_attribute)
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(defaults.default_attribute);

        Self {
            host,
            token,
            timeout,
            synonyms,
            default_attribute,
            nicknames,
        }
    }
}
