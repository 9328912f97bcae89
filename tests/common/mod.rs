//! Shared test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use things_gateway::{Error, MutationDescriptor, Result, Thing, ThingsApi};

/// Registry listing used across the end-to-end tests
pub const KITCHEN_REGISTRY: &str = r#"[
    {
        "title": "Kitchen Light",
        "properties": {
            "on": {"title": "On/Off", "links": [{"href": "/things/1/properties/on"}]}
        }
    }
]"#;

/// Parse a registry listing
#[must_use]
pub fn registry(json: &str) -> Vec<Thing> {
    serde_json::from_str(json).expect("invalid registry fixture")
}

/// In-memory Things API that records mutations
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    things: Option<Vec<Thing>>,
    reject_puts: bool,
    puts: Arc<Mutex<Vec<MutationDescriptor>>>,
}

impl FakeApi {
    /// Serve `things` as the registry
    #[must_use]
    pub fn with_things(things: Vec<Thing>) -> Self {
        Self {
            things: Some(things),
            ..Self::default()
        }
    }

    /// Fail every registry fetch
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Reject every mutation
    #[must_use]
    pub fn rejecting_puts(mut self) -> Self {
        self.reject_puts = true;
        self
    }

    /// Handle on the recorded mutations
    #[must_use]
    pub fn puts(&self) -> Arc<Mutex<Vec<MutationDescriptor>>> {
        Arc::clone(&self.puts)
    }
}

#[async_trait]
impl ThingsApi for FakeApi {
    async fn things(&self) -> Result<Vec<Thing>> {
        self.things
            .clone()
            .ok_or_else(|| Error::RegistryUnavailable("connection refused".to_string()))
    }

    async fn put(&self, descriptor: &MutationDescriptor) -> Result<()> {
        if self.reject_puts {
            return Err(Error::Dispatch(format!("{}: 400 Bad Request", descriptor.url)));
        }
        self.puts.lock().unwrap().push(descriptor.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
