//! Error types for the Things gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Things gateway
///
/// Resolution outcomes (unknown device, unmatched property, deferred action)
/// are not errors; see [`crate::resolve::Resolution`]
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Things registry could not be fetched
    #[error("registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// Property mutation was rejected by the Things API
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// Host is not a valid URL
    #[error("invalid host: {0}")]
    InvalidHost(#[from] url::ParseError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
