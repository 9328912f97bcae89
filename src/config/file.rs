//! TOML configuration file loading
//!
//! Supports `~/.config/omni/things/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::Result;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct ThingsConfigFile {
    /// Things gateway connection
    #[serde(default)]
    pub gateway: GatewayFileConfig,

    /// Name matching configuration
    #[serde(default)]
    pub matching: MatchingFileConfig,

    /// Nickname → registry name, in file order
    #[serde(default)]
    pub nicknames: IndexMap<String, String>,
}

/// Gateway connection settings
#[derive(Debug, Default, Deserialize)]
pub struct GatewayFileConfig {
    /// Base URL (e.g. "http://gateway.local:8080")
    pub host: Option<String>,

    /// Bearer token
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Name and property matching settings
#[derive(Debug, Default, Deserialize)]
pub struct MatchingFileConfig {
    /// Synonym sets (e.g. `[["light", "lamp", "lights"]]`)
    pub synonyms: Option<Vec<Vec<String>>>,

    /// Property assumed when a request names none
    pub default_attribute: Option<String>,
}

/// Parse config file contents
///
/// # Errors
///
/// Returns error if the contents are not valid TOML for this schema
pub fn parse_config_file(content: &str) -> Result<ThingsConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Load the TOML config file at `path`
///
/// Returns `ThingsConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file(path: &Path) -> ThingsConfigFile {
    if !path.exists() {
        return ThingsConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match parse_config_file(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                ThingsConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            ThingsConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/omni/things/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| {
        d.config_dir()
            .join("omni")
            .join("things")
            .join("config.toml")
    })
}
