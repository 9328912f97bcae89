//! HTTP client for the Things API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use super::{Thing, ThingsApi};
use crate::resolve::MutationDescriptor;
use crate::{Error, Result};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a Things gateway
#[derive(Debug, Clone)]
pub struct ThingsClient {
    client: Client,
    /// Base URL without trailing slash; `None` when unconfigured
    host: Option<String>,
}

impl ThingsClient {
    /// Create a client for `host`, authenticating with `token`
    ///
    /// A blank host yields a client whose registry is always empty
    ///
    /// # Errors
    ///
    /// Returns error if the host is not a valid http(s) URL, the token is not a valid
    /// header value, or the HTTP client cannot be built
    pub fn new(
        host: Option<&str>,
        token: Option<&SecretString>,
        timeout: Duration,
    ) -> Result<Self> {
        let host = match host.map(str::trim) {
            Some(host) if !host.is_empty() => {
                let host = host.trim_end_matches('/');
                let parsed = url::Url::parse(host)?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(Error::Config(format!(
                        "host must be an http or https URL: {host}"
                    )));
                }
                Some(host.to_string())
            }
            _ => None,
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| Error::Config(format!("invalid token: {e}")))?;
            bearer.set_sensitive(true);
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, host })
    }

    /// Configured base URL
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Absolute URL for a property href
    ///
    /// Relative hrefs are joined onto the host; absolute ones pass through
    ///
    /// # Errors
    ///
    /// Returns error if the href is empty, or relative with no host configured
    pub fn property_url(&self, href: &str) -> Result<String> {
        if href.is_empty() {
            return Err(Error::Dispatch("property has no link".to_string()));
        }

        if url::Url::parse(href).is_ok() {
            return Ok(href.to_string());
        }

        let host = self
            .host
            .as_deref()
            .ok_or_else(|| Error::Config("no host configured".to_string()))?;

        if href.starts_with('/') {
            Ok(format!("{host}{href}"))
        } else {
            Ok(format!("{host}/{href}"))
        }
    }
}

/// Decode a registry listing, dropping records that do not parse
fn parse_things(records: Vec<Value>) -> Vec<Thing> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Thing>(record) {
            Ok(thing) => Some(thing),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed thing record");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ThingsApi for ThingsClient {
    async fn things(&self) -> Result<Vec<Thing>> {
        let Some(host) = &self.host else {
            tracing::debug!("no host configured, registry is empty");
            return Ok(Vec::new());
        };

        let url = format!("{host}/things/");
        tracing::debug!(url = %url, "fetching things");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::RegistryUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::RegistryUnavailable(format!("{status} - {body}")));
        }

        let records: Vec<Value> = response
            .json()
            .await
            .map_err(|e| Error::RegistryUnavailable(format!("invalid registry listing: {e}")))?;

        let things = parse_things(records);
        tracing::debug!(count = things.len(), "fetched things");
        Ok(things)
    }

    async fn put(&self, descriptor: &MutationDescriptor) -> Result<()> {
        let url = self.property_url(&descriptor.url)?;
        tracing::debug!(url = %url, method = %descriptor.method, "dispatching mutation");

        let response = self
            .client
            .put(&url)
            .json(&descriptor.payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Dispatch(format!("{url}: {status} - {body}")));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "things-http"
    }
}
